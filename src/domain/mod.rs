//! Value types of the pair AMM domain.
//!
//! Fixed-point amounts, rounding directions, fee rates and the asset-kind
//! identities that tag every vault.  All types are `Copy` values with
//! validated constructors; ownership-carrying types live in
//! [`custody`](crate::custody).

mod amount;
mod asset_kind;
mod asset_pair;
mod fee_rate;
mod rounding;

pub use amount::{Amount, DECIMALS};
pub use asset_kind::AssetKind;
pub use asset_pair::{AssetPair, SwapDirection};
pub use fee_rate::FeeRate;
pub use rounding::Rounding;
