//! `Result`-returning arithmetic on [`Amount`].
//!
//! [`Amount`]'s own checked methods return `Option`; pool code wants a
//! typed [`PairError`] it can propagate with `?`.  [`CheckedArithmetic`]
//! bridges the two so that every guard clause reads as a single line.
//!
//! # Examples
//!
//! ```
//! use pair_amm::domain::{Amount, Rounding};
//! use pair_amm::math::CheckedArithmetic;
//!
//! let reserve = Amount::from_units(100);
//! let grown = reserve.safe_add(&Amount::from_units(10)).expect("no overflow");
//! assert_eq!(grown, Amount::from_units(110));
//! assert!(Amount::ZERO.safe_sub(&Amount::ONE).is_err());
//! ```

use crate::domain::{Amount, Rounding};
use crate::error::PairError;

/// Fallible arithmetic that reports *which* failure occurred.
///
/// # Contract
///
/// - No panics: every failure is an `Err`.
/// - No silent saturation: callers that want saturation ask for it on
///   [`Amount`] directly.
pub trait CheckedArithmetic: Sized {
    /// Addition that names its failure.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Overflow`] if the sum is unrepresentable.
    fn safe_add(&self, other: &Self) -> Result<Self, PairError>;

    /// Subtraction that names its failure.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Overflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, PairError>;

    /// Checked `self × numerator ÷ denominator` with one rounding step.
    ///
    /// # Errors
    ///
    /// - [`PairError::DivisionByZero`] if `denominator` is zero.
    /// - [`PairError::Overflow`] if the intermediate product overflows.
    fn safe_mul_div(
        &self,
        numerator: &Self,
        denominator: &Self,
        rounding: Rounding,
    ) -> Result<Self, PairError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PairError> {
        self.checked_add(other)
            .ok_or(PairError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PairError> {
        self.checked_sub(other)
            .ok_or(PairError::Overflow("amount subtraction underflow"))
    }

    fn safe_mul_div(
        &self,
        numerator: &Self,
        denominator: &Self,
        rounding: Rounding,
    ) -> Result<Self, PairError> {
        if denominator.is_zero() {
            return Err(PairError::DivisionByZero);
        }
        self.mul_div(numerator, denominator, rounding)
            .ok_or(PairError::Overflow("amount mul_div overflow"))
    }
}
