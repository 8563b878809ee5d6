//! Fractional trading fee in fixed-point precision.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::PairError;

/// Denominator of [`FeeRate::from_basis_points`] (10 000 bp = 100%).
const BPS_DENOMINATOR: u128 = 10_000;

/// The share of every swap input that stays in the pool unconverted.
///
/// Stored as a fixed-point fraction, so `0.003` is a 0.30% fee.  Values at
/// or above `1.0` are representable on purpose: fee updates are not
/// bounded.  [`is_valid_rate`](Self::is_valid_rate) reports whether the
/// rate lies in `[0, 1)`.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, FeeRate};
///
/// let fee = FeeRate::from_basis_points(30);
/// assert_eq!(fee.rate().to_string(), "0.00300000");
/// assert_eq!(
///     fee.net_of_fee(Amount::from_units(10)).map(|v| v.to_string()),
///     Ok("9.97000000".to_string())
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeRate(Amount);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(Amount::ZERO);

    /// Wraps a fractional rate.
    pub const fn new(rate: Amount) -> Self {
        Self(rate)
    }

    /// Builds a rate from basis points (1 bp = 0.0001).
    pub const fn from_basis_points(bps: u32) -> Self {
        Self(Amount::from_raw(
            bps as u128 * (Amount::ONE.raw() / BPS_DENOMINATOR),
        ))
    }

    /// Returns the underlying fraction.
    pub const fn rate(&self) -> Amount {
        self.0
    }

    /// Returns `true` if the rate is in `[0, 1)`.
    #[must_use]
    pub const fn is_valid_rate(&self) -> bool {
        self.0.raw() < Amount::ONE.raw()
    }

    /// `1 - rate`, saturating at zero for rates of `1.0` or more.
    pub const fn complement(&self) -> Amount {
        Amount::ONE.saturating_sub(&self.0)
    }

    /// The part of `amount` that reaches the pricing curve:
    /// `amount × (1 - rate)`, rounded down.
    ///
    /// # Errors
    ///
    /// [`PairError::Overflow`] if the raw product does not fit in `u128`.
    pub fn net_of_fee(&self, amount: Amount) -> Result<Amount, PairError> {
        amount
            .checked_mul(&self.complement(), Rounding::Down)
            .ok_or(PairError::Overflow("fee deduction overflow"))
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
