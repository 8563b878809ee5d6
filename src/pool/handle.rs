//! The shared, lock-protected pool handle.

use core::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::admin::PoolAdmin;
use super::state::{PoolAmounts, PoolSnapshot, PoolState};
use crate::config::PoolConfig;
use crate::custody::{AssetVault, TokenBundle};
use crate::domain::{Amount, AssetKind, AssetPair, FeeRate, SwapDirection};
use crate::error::{PairError, Rejected};
use crate::events::{EventSink, TracingSink};
use crate::traits::SwapPair;

/// A constant-product pool over one [`AssetPair`].
///
/// `PairPool` is a cheap handle: clones share the same state behind a
/// single mutex.  Every operation takes that lock once for its whole
/// check-then-commit sequence, so concurrent callers observe a total
/// order of operations and no swap is priced against stale reserves.
///
/// Construction returns the pool together with its unique [`PoolAdmin`];
/// nothing reachable from a `PairPool` grants admin rights.
///
/// # Examples
///
/// ```
/// use pair_amm::config::PoolConfig;
/// use pair_amm::custody::Issuer;
/// use pair_amm::domain::{Amount, AssetPair, FeeRate};
/// use pair_amm::pool::PairPool;
///
/// let mut usd = Issuer::new("USD");
/// let mut eur = Issuer::new("EUR");
/// let pair = AssetPair::new(usd.kind(), eur.kind()).expect("distinct");
/// let config = PoolConfig::new(pair, FeeRate::from_basis_points(30));
///
/// let (pool, admin) = PairPool::with_tracing(config).expect("valid config");
/// let seed = pool
///     .create_token_bundle(
///         usd.mint(Amount::from_units(100)).expect("mint"),
///         eur.mint(Amount::from_units(100)).expect("mint"),
///     )
///     .expect("pair kinds");
/// let _shares = admin.bootstrap(seed).expect("first liquidity");
/// admin.unfreeze();
///
/// let euros = pool
///     .swap(usd.mint(Amount::from_units(10)).expect("mint"))
///     .expect("swap");
/// assert_eq!(euros.balance().to_string(), "9.06610893");
/// # eur.burn(euros).expect("burn");
/// ```
#[derive(Clone)]
pub struct PairPool {
    inner: Arc<Mutex<PoolState>>,
    pair: AssetPair,
    share_kind: AssetKind,
}

impl PairPool {
    /// Creates a pool reporting to `sink`.
    ///
    /// The pool starts with empty reserves and no shares; the returned
    /// admin must [`bootstrap`](PoolAdmin::bootstrap) it.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InvalidConfiguration`] if `config` fails
    /// [`PoolConfig::validate`].
    pub fn new(
        config: PoolConfig,
        sink: impl EventSink + 'static,
    ) -> Result<(Self, PoolAdmin), PairError> {
        config.validate()?;
        let mut state = PoolState::new(&config, Arc::new(sink));
        let initialized = state.take_events();
        let pool = Self {
            pair: state.pair,
            share_kind: state.share_kind(),
            inner: Arc::new(Mutex::new(state)),
        };
        tracing::info!(
            pair = %pool.pair,
            share_kind = %pool.share_kind,
            fee = %config.fee_percentage(),
            frozen = config.start_frozen(),
            "pair pool created"
        );
        initialized.deliver();
        let admin = PoolAdmin::new(pool.clone());
        Ok((pool, admin))
    }

    /// Creates a pool that logs its events through `tracing`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_tracing(config: PoolConfig) -> Result<(Self, PoolAdmin), PairError> {
        Self::new(config, TracingSink)
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.inner.lock()
    }

    /// Runs `op` under the lock, then delivers the events it raised once
    /// the lock is released, so a sink may call back into the pool.
    pub(super) fn with_state<R>(&self, op: impl FnOnce(&mut PoolState) -> R) -> R {
        let mut state = self.lock();
        let result = op(&mut state);
        let pending = state.take_events();
        drop(state);
        pending.deliver();
        result
    }

    /// The traded pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Kind of this pool's liquidity shares.
    #[must_use]
    pub const fn share_kind(&self) -> AssetKind {
        self.share_kind
    }

    /// Current reserve balances.
    #[must_use]
    pub fn get_pool_amounts(&self) -> PoolAmounts {
        self.lock().amounts()
    }

    /// Every observable field, read under one lock.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        self.lock().snapshot()
    }

    /// Outstanding liquidity shares.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.lock().total_supply()
    }

    /// Current swap fee.
    #[must_use]
    pub fn fee_percentage(&self) -> FeeRate {
        self.lock().fee_percentage
    }

    /// Whether swaps are currently refused.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.lock().frozen
    }

    /// [`quote_exact_in`](super::quote_exact_in) against the current
    /// reserves of `direction`.  The fee is not applied.
    ///
    /// # Errors
    ///
    /// Propagates [`quote_exact_in`](super::quote_exact_in) failures.
    pub fn quote_swap_exact_in(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, PairError> {
        self.lock().curve_quote_in(direction, amount_in)
    }

    /// [`quote_exact_out`](super::quote_exact_out) against the current
    /// reserves of `direction`.  The fee is not applied.
    ///
    /// # Errors
    ///
    /// [`PairError::InsufficientReserve`] if `amount_out` is not below
    /// the output reserve.
    pub fn quote_swap_exact_out(
        &self,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<Amount, PairError> {
        self.lock().curve_quote_out(direction, amount_out)
    }

    /// Output a swap of `amount_in` in `direction` would pay right now,
    /// fee deducted.  This is what [`swap`](Self::swap) pays.
    ///
    /// # Errors
    ///
    /// - [`PairError::Overflow`] if an intermediate value overflows.
    pub fn quote_swap_exact_in_net(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, PairError> {
        self.lock().quote_in(direction, amount_in)
    }

    /// Input, fee included, a swap in `direction` needs to pay at least
    /// `amount_out` right now.
    ///
    /// # Errors
    ///
    /// - [`PairError::InsufficientReserve`] if `amount_out` is not below
    ///   the output reserve.
    /// - [`PairError::AmountTooSmall`] if the fee rate is `1` or more.
    pub fn quote_swap_exact_out_gross(
        &self,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<Amount, PairError> {
        self.lock().quote_out(direction, amount_out)
    }

    /// An empty bundle for this pool's pair.
    pub const fn create_empty_token_bundle(&self) -> TokenBundle {
        TokenBundle::new(self.pair)
    }

    /// Wraps `token1` and `token2` in a bundle for this pool.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::TypeMismatch`], with both vaults, if either
    /// does not hold its side's kind.
    pub fn create_token_bundle(
        &self,
        token1: AssetVault,
        token2: AssetVault,
    ) -> Result<TokenBundle, Rejected<(AssetVault, AssetVault)>> {
        let mismatch = if token1.kind() != self.pair.token1() {
            Some((self.pair.token1(), token1.kind()))
        } else if token2.kind() != self.pair.token2() {
            Some((self.pair.token2(), token2.kind()))
        } else {
            None
        };
        match mismatch {
            Some((expected, found)) => Err(Rejected::new(
                PairError::TypeMismatch { expected, found },
                (token1, token2),
            )),
            None => Ok(TokenBundle::assemble(self.pair, token1, token2)),
        }
    }

    /// Sells the whole of `from`; the direction follows from its kind.
    ///
    /// # Errors
    ///
    /// See [`SwapPair::swap`].
    pub fn swap(&self, from: AssetVault) -> Result<AssetVault, Rejected<AssetVault>> {
        self.with_state(|state| state.swap(from, None))
    }

    /// Sells token1 for token2.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap); a vault of any other kind than token1
    /// fails with [`PairError::TypeMismatch`].
    pub fn swap_token1_for_token2(
        &self,
        from: AssetVault,
    ) -> Result<AssetVault, Rejected<AssetVault>> {
        self.with_state(|state| state.swap(from, Some(SwapDirection::Token1ToToken2)))
    }

    /// Sells token2 for token1.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap); a vault of any other kind than token2
    /// fails with [`PairError::TypeMismatch`].
    pub fn swap_token2_for_token1(
        &self,
        from: AssetVault,
    ) -> Result<AssetVault, Rejected<AssetVault>> {
        self.with_state(|state| state.swap(from, Some(SwapDirection::Token2ToToken1)))
    }

    /// Deposits `bundle` and mints shares.
    ///
    /// # Errors
    ///
    /// See [`SwapPair::add_liquidity`].
    pub fn add_liquidity(&self, bundle: TokenBundle) -> Result<AssetVault, Rejected<TokenBundle>> {
        self.with_state(|state| state.add_liquidity(bundle))
    }

    /// Burns `shares` for a proportional part of the reserves.
    ///
    /// # Errors
    ///
    /// See [`SwapPair::remove_liquidity`].
    pub fn remove_liquidity(
        &self,
        shares: AssetVault,
    ) -> Result<TokenBundle, Rejected<AssetVault>> {
        self.with_state(|state| state.remove_liquidity(shares))
    }

    /// Adds `bundle` to the reserves without minting shares, raising the
    /// value of every outstanding share.
    ///
    /// # Errors
    ///
    /// - [`PairError::TypeMismatch`] for a bundle of another pair.
    /// - [`PairError::EmptyVault`] if both sides are empty.
    /// - [`PairError::Overflow`] if a reserve would overflow.
    pub fn donate_liquidity(&self, bundle: TokenBundle) -> Result<(), Rejected<TokenBundle>> {
        self.with_state(|state| state.donate_liquidity(bundle))
    }

    /// Destroys `shares` without redeeming them and returns the amount
    /// burned.  The supply drops by that amount; the reserves stay put and
    /// now back fewer shares.
    ///
    /// # Errors
    ///
    /// [`PairError::TypeMismatch`] if `shares` is not of this pool's share
    /// kind.
    pub fn burn_shares(&self, shares: AssetVault) -> Result<Amount, Rejected<AssetVault>> {
        self.with_state(|state| state.burn_shares(shares))
    }
}

impl SwapPair for PairPool {
    fn swap(&self, from: AssetVault) -> Result<AssetVault, Rejected<AssetVault>> {
        Self::swap(self, from)
    }

    fn add_liquidity(&self, bundle: TokenBundle) -> Result<AssetVault, Rejected<TokenBundle>> {
        Self::add_liquidity(self, bundle)
    }

    fn remove_liquidity(&self, shares: AssetVault) -> Result<TokenBundle, Rejected<AssetVault>> {
        Self::remove_liquidity(self, shares)
    }
}

impl fmt::Debug for PairPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairPool")
            .field("pair", &self.pair)
            .field("share_kind", &self.share_kind)
            .finish_non_exhaustive()
    }
}
