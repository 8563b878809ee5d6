//! The delegable trading surface of a pair.
//!
//! [`SwapPair`] is the part of a pool that may be handed to third parties:
//! trading and providing or withdrawing liquidity.  Every privileged
//! operation (freezing, fee changes, bootstrap, proxy management) lives
//! on [`PoolAdmin`](crate::pool::PoolAdmin) and is deliberately absent
//! here.
//!
//! # Ownership Contract
//!
//! Each method consumes the caller's assets.  On success the pool hands
//! back the counter-assets; on failure the untouched input comes back
//! inside a [`Rejected`], so no call path destroys value:
//!
//! ```text
//! swap(vault)             -> Ok(counter vault)   | Err(Rejected<vault>)
//! add_liquidity(bundle)   -> Ok(share vault)     | Err(Rejected<bundle>)
//! remove_liquidity(share) -> Ok(bundle)          | Err(Rejected<share>)
//! ```

use crate::custody::{AssetVault, TokenBundle};
use crate::error::Rejected;

/// Trading and liquidity operations on a two-asset pool.
///
/// # Implementors
///
/// - [`PairPool`](crate::pool::PairPool), the shared pool handle.
/// - [`SwapProxy`](crate::pool::SwapProxy), a revocable capability issued
///   by the pool admin.
///
/// # Atomicity
///
/// Every method validates and computes the complete outcome before
/// touching pool state.  A returned error guarantees the pool is exactly
/// as it was before the call.
pub trait SwapPair {
    /// Sells the whole of `from` for the other asset of the pair.
    ///
    /// The direction follows from the vault's kind.  The fee is deducted
    /// from the input before pricing and the full input stays in the pool.
    ///
    /// # Errors
    ///
    /// - [`PairError::PoolFrozen`](crate::error::PairError::PoolFrozen) while the pool is frozen.
    /// - [`PairError::TypeMismatch`](crate::error::PairError::TypeMismatch) if the kind is not part of the pair.
    /// - [`PairError::EmptyVault`](crate::error::PairError::EmptyVault) for a zero balance.
    /// - [`PairError::AmountTooSmall`](crate::error::PairError::AmountTooSmall) if the output rounds to zero.
    /// - [`PairError::Unauthorized`](crate::error::PairError::Unauthorized) from a revoked proxy.
    fn swap(&self, from: AssetVault) -> Result<AssetVault, Rejected<AssetVault>>;

    /// Deposits both sides of `bundle` and mints shares for the smaller
    /// proportional contribution.
    ///
    /// # Errors
    ///
    /// - [`PairError::NotInitialized`](crate::error::PairError::NotInitialized) before bootstrap.
    /// - [`PairError::TypeMismatch`](crate::error::PairError::TypeMismatch) for a bundle of another pair.
    /// - [`PairError::EmptyVault`](crate::error::PairError::EmptyVault) if either side is empty.
    /// - [`PairError::LiquidityTooSmall`](crate::error::PairError::LiquidityTooSmall) if no share would be minted.
    /// - [`PairError::Unauthorized`](crate::error::PairError::Unauthorized) from a revoked proxy.
    fn add_liquidity(&self, bundle: TokenBundle) -> Result<AssetVault, Rejected<TokenBundle>>;

    /// Burns `shares` and pays out the proportional part of both
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`PairError::TypeMismatch`](crate::error::PairError::TypeMismatch) if the vault does not hold shares of this pool.
    /// - [`PairError::EmptyVault`](crate::error::PairError::EmptyVault) for a zero balance.
    /// - [`PairError::Precondition`](crate::error::PairError::Precondition) when redeeming the entire supply.
    /// - [`PairError::LiquidityTooSmall`](crate::error::PairError::LiquidityTooSmall) if the redeemed fraction rounds to zero.
    /// - [`PairError::Unauthorized`](crate::error::PairError::Unauthorized) from a revoked proxy.
    fn remove_liquidity(&self, shares: AssetVault) -> Result<TokenBundle, Rejected<AssetVault>>;
}
