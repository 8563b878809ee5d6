//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pair_amm::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::custody::{AssetVault, Issuer, TokenBundle};
pub use crate::domain::{Amount, AssetKind, AssetPair, FeeRate, Rounding, SwapDirection};
pub use crate::error::{PairError, Rejected, Result};
pub use crate::events::{EventSink, PoolEvent, RecordingSink, TracingSink};
pub use crate::math::CheckedArithmetic;
pub use crate::pool::{PairPool, PoolAdmin, PoolAmounts, PoolSnapshot, SwapProxy};
pub use crate::traits::SwapPair;
