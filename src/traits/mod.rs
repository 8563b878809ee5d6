//! Core trait abstractions for pair operations.
//!
//! [`SwapPair`] is the capability boundary between a pool's public
//! trading surface and its admin.

mod swap_pair;

pub use swap_pair::SwapPair;
