//! Move-only asset custody.
//!
//! [`AssetVault`] holds a balance of one [`AssetKind`](crate::domain::AssetKind)
//! and can only be split or merged, never copied.  [`TokenBundle`] carries
//! one vault of each pool asset.  [`Issuer`] is the mint/burn authority of
//! a kind and the only place units are created or destroyed.

mod bundle;
mod issuer;
mod vault;

pub use bundle::TokenBundle;
pub use issuer::Issuer;
pub use vault::AssetVault;
