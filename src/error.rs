//! Unified error types for the pair AMM.
//!
//! Every fallible operation that only *borrows* its inputs returns
//! [`PairError`].  Operations that *consume* a move-only input (a vault,
//! a bundle) return [`Rejected<T>`] instead, so that a refused call hands
//! the caller's assets back rather than destroying them.

use core::fmt;

use thiserror::Error;

use crate::domain::{Amount, AssetKind};

/// Errors produced by pair AMM operations.
///
/// All failures are raised before the pool is mutated: a returned error
/// means the pool state is exactly what it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairError {
    /// Swaps are refused while the pool is frozen.
    #[error("pool is frozen")]
    PoolFrozen,

    /// The supplied vault (or one side of a bundle) holds nothing.
    #[error("vault is empty")]
    EmptyVault,

    /// A withdrawal asked for more than the vault holds.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount that was asked for.
        requested: Amount,
        /// Amount actually held.
        available: Amount,
    },

    /// A vault of one asset kind was offered where another was required.
    #[error("asset kind mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the receiver accepts.
        expected: AssetKind,
        /// Kind that was offered.
        found: AssetKind,
    },

    /// An exact-out request asked for at least the whole counter reserve.
    #[error("requested output exceeds the available reserve")]
    InsufficientReserve,

    /// Rounding drove the swap output to zero.
    #[error("amount too small: output rounds to zero")]
    AmountTooSmall,

    /// The pool has no liquidity shares outstanding yet.
    #[error("pool has not been bootstrapped")]
    NotInitialized,

    /// Bootstrap was attempted on a pool that already has shares.
    #[error("pool is already initialized")]
    AlreadyInitialized,

    /// Share arithmetic rounded to zero.
    #[error("liquidity amount too small")]
    LiquidityTooSmall,

    /// The capability used for the call is not (or no longer) valid.
    #[error("unauthorized")]
    Unauthorized,

    /// A documented precondition of the operation does not hold.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),

    /// A pool configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A textual amount could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Fixed-point arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by a zero fixed-point value.
    #[error("division by zero")]
    DivisionByZero,
}

impl PairError {
    /// Returns `true` for the precondition-violation family: frozen pool,
    /// empty vault, non-positive amount, full-supply redemption.
    #[must_use]
    pub const fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::PoolFrozen | Self::EmptyVault | Self::Precondition(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PairError>;

/// A refused operation together with the input it consumed.
///
/// Vaults and bundles are move-only, so an operation that takes one by
/// value must give it back when it fails.  `Rejected` pairs the
/// [`PairError`] with that input.
///
/// # Examples
///
/// ```
/// use pair_amm::custody::Issuer;
/// use pair_amm::domain::Amount;
/// use pair_amm::error::PairError;
///
/// let mut usd = Issuer::new("USD");
/// let mut eur = Issuer::new("EUR");
/// let mut wallet = usd.create_empty_vault();
/// let euros = eur.mint(Amount::from_units(5)).expect("mint");
///
/// let rejected = wallet.deposit(euros).unwrap_err();
/// assert!(matches!(rejected.error(), PairError::TypeMismatch { .. }));
///
/// // The euros are not lost.
/// let euros = rejected.into_input();
/// assert_eq!(euros.balance(), Amount::from_units(5));
/// eur.burn(euros).expect("burn");
/// ```
#[must_use = "a rejected input still owns assets"]
pub struct Rejected<T> {
    error: PairError,
    input: T,
}

impl<T> Rejected<T> {
    /// Wraps `error` together with the returned `input`.
    pub const fn new(error: PairError, input: T) -> Self {
        Self { error, input }
    }

    /// The reason the operation was refused.
    #[must_use]
    pub const fn error(&self) -> &PairError {
        &self.error
    }

    /// Borrows the returned input.
    #[must_use]
    pub const fn input(&self) -> &T {
        &self.input
    }

    /// Takes back the input, discarding the error.
    pub fn into_input(self) -> T {
        self.input
    }

    /// Splits into the error and the returned input.
    pub fn into_parts(self) -> (PairError, T) {
        (self.error, self.input)
    }

    /// Applies `f` to the returned input, keeping the error.
    pub fn map_input<U>(self, f: impl FnOnce(T) -> U) -> Rejected<U> {
        Rejected {
            error: self.error,
            input: f(self.input),
        }
    }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation rejected: {}", self.error)
    }
}

impl<T> std::error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Drops the returned input.  Only use where losing it is acceptable,
/// e.g. in examples that abort on the first error.
impl<T> From<Rejected<T>> for PairError {
    fn from(rejected: Rejected<T>) -> Self {
        rejected.error
    }
}
