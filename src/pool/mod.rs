//! The constant-product pair: state, pricing, liquidity and admin.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`PairPool`] | shared handle; trading, liquidity and read-only queries |
//! | [`PoolAdmin`] | freeze, fee updates, bootstrap, proxy management |
//! | [`SwapProxy`] | revocable [`SwapPair`](crate::traits::SwapPair) capability |
//! | [`quote_exact_in`] / [`quote_exact_out`] | the bare curve formulas |
//!
//! All pool state sits behind one lock.  Each operation validates its
//! input and computes every amount it will move before changing
//! anything; a failed call leaves the pool untouched and returns the
//! caller's assets in a [`Rejected`](crate::error::Rejected).

mod admin;
mod handle;
mod liquidity;
mod state;
mod swap;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use admin::{PoolAdmin, SwapProxy};
pub use handle::PairPool;
pub use state::{PoolAmounts, PoolSnapshot};
pub use swap::{quote_exact_in, quote_exact_out};
