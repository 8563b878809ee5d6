//! Arithmetic helpers shared by the swap and liquidity code.
//!
//! [`CheckedArithmetic`] turns [`Amount`](crate::domain::Amount)'s
//! `Option`-returning operations into typed errors.  The free functions
//! here hold the curve-level formulas that do not belong to a single
//! value type.

mod checked;

pub use checked::CheckedArithmetic;

use crate::domain::Amount;

/// Fixed-point `10^4`: liquidity percentages are expressed against this
/// scale so that four fractional digits of the ratio survive the division.
pub const PERCENT_SCALE: Amount = Amount::from_units(10_000);

/// `reserve1 × reserve2` on raw units, or `None` if it overflows `u128`.
///
/// The raw product is a fixed-point value scaled by `10^16`; it is only
/// meaningful for comparisons between two states of the same pool.
#[must_use]
pub const fn invariant_product(reserve1: Amount, reserve2: Amount) -> Option<u128> {
    reserve1.raw().checked_mul(reserve2.raw())
}
