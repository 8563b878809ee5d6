//! Privileged pool control and delegated trading capabilities.
//!
//! [`PoolAdmin`] is created once, together with its [`PairPool`], and is
//! the only holder of the privileged operations.  It is neither `Clone`
//! nor reachable from the pool.  Third parties get a [`SwapProxy`]: a
//! revocable capability that implements [`SwapPair`] and nothing else.

use super::handle::PairPool;
use crate::custody::{AssetVault, TokenBundle};
use crate::domain::FeeRate;
use crate::error::{PairError, Rejected};
use crate::events::PoolEvent;
use crate::traits::SwapPair;

/// Admin capability of one pool.
#[derive(Debug)]
pub struct PoolAdmin {
    pool: PairPool,
}

impl PoolAdmin {
    pub(super) const fn new(pool: PairPool) -> Self {
        Self { pool }
    }

    /// The pool this admin controls.
    #[must_use]
    pub const fn pool(&self) -> &PairPool {
        &self.pool
    }

    /// Refuses all swaps until [`unfreeze`](Self::unfreeze).  Liquidity
    /// operations are unaffected.
    pub fn freeze(&self) {
        self.pool.lock().frozen = true;
        tracing::info!(pair = %self.pool.pair(), "pool frozen");
    }

    /// Accepts swaps again.
    pub fn unfreeze(&self) {
        self.pool.lock().frozen = false;
        tracing::info!(pair = %self.pool.pair(), "pool unfrozen");
    }

    /// Replaces the swap fee.
    ///
    /// The rate is not bounded: a rate of `1` or more is accepted and makes
    /// every later swap fail with [`PairError::AmountTooSmall`].
    pub fn update_fee_percentage(&self, fee_percentage: FeeRate) {
        let previous = self.pool.with_state(|state| {
            let previous = state.fee_percentage;
            state.fee_percentage = fee_percentage;
            state.emit(PoolEvent::FeeUpdated { fee_percentage });
            previous
        });
        if !fee_percentage.is_valid_rate() {
            tracing::warn!(%fee_percentage, "fee rate disables all swaps");
        }
        tracing::info!(%previous, %fee_percentage, "fee updated");
    }

    /// Seeds an empty pool and returns the first `1.0` share.
    ///
    /// # Errors
    ///
    /// - [`PairError::AlreadyInitialized`] if shares already exist.
    /// - [`PairError::TypeMismatch`] for a bundle of another pair.
    /// - [`PairError::EmptyVault`] if either side is empty.
    pub fn bootstrap(&self, bundle: TokenBundle) -> Result<AssetVault, Rejected<TokenBundle>> {
        self.pool.with_state(|state| state.bootstrap(bundle))
    }

    /// Issues a trading capability that stays valid until the next
    /// [`revoke_swap_proxies`](Self::revoke_swap_proxies).
    pub fn create_swap_proxy(&self) -> SwapProxy {
        let epoch = self.pool.lock().proxy_epoch;
        tracing::debug!(epoch, "swap proxy created");
        SwapProxy {
            pool: self.pool.clone(),
            epoch,
        }
    }

    /// Invalidates every proxy issued so far.
    pub fn revoke_swap_proxies(&self) {
        let mut state = self.pool.lock();
        state.proxy_epoch = state.proxy_epoch.wrapping_add(1);
        tracing::info!(epoch = state.proxy_epoch, "swap proxies revoked");
    }
}

/// A delegated, revocable right to trade on one pool.
///
/// Exposes only [`SwapPair`]; there is no path from a proxy back to the
/// pool handle or its admin.
#[derive(Debug, Clone)]
#[must_use]
pub struct SwapProxy {
    pool: PairPool,
    epoch: u64,
}

impl SwapProxy {
    /// Returns `true` once the admin has revoked this proxy.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.pool.lock().proxy_epoch != self.epoch
    }

    fn unauthorized<T>(&self, input: T) -> Rejected<T> {
        tracing::debug!(epoch = self.epoch, "revoked swap proxy used");
        Rejected::new(PairError::Unauthorized, input)
    }
}

impl SwapPair for SwapProxy {
    fn swap(&self, from: AssetVault) -> Result<AssetVault, Rejected<AssetVault>> {
        self.pool.with_state(|state| {
            if state.proxy_epoch != self.epoch {
                return Err(self.unauthorized(from));
            }
            state.swap(from, None)
        })
    }

    fn add_liquidity(&self, bundle: TokenBundle) -> Result<AssetVault, Rejected<TokenBundle>> {
        self.pool.with_state(|state| {
            if state.proxy_epoch != self.epoch {
                return Err(self.unauthorized(bundle));
            }
            state.add_liquidity(bundle)
        })
    }

    fn remove_liquidity(&self, shares: AssetVault) -> Result<TokenBundle, Rejected<AssetVault>> {
        self.pool.with_state(|state| {
            if state.proxy_epoch != self.epoch {
                return Err(self.unauthorized(shares));
            }
            state.remove_liquidity(shares)
        })
    }
}
