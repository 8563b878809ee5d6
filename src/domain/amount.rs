//! Unsigned fixed-point decimal amount with checked arithmetic.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Rounding;
use crate::error::PairError;

/// Number of fractional decimal digits carried by an [`Amount`].
pub const DECIMALS: u32 = 8;

/// Raw units per whole unit (`10^DECIMALS`).
const SCALE: u128 = 100_000_000;

/// A nonnegative fixed-point decimal with eight fractional digits.
///
/// The value is stored as a raw `u128` count of `10^-8` units, so
/// `Amount::from_raw(150_000_000)` is `1.5`.  Every result is
/// bit-reproducible: no floating point is involved anywhere.
///
/// Arithmetic never panics: overflow, underflow and a zero divisor all
/// surface as `None`.  Division always
/// takes an explicit [`Rounding`] direction.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, Rounding};
///
/// let a: Amount = "9.97".parse().expect("valid amount");
/// let b = Amount::from_units(100);
/// assert_eq!(a.checked_add(&b), Some("109.97".parse().expect("valid")));
///
/// // 100 * 9.97 / 109.97, rounded down to eight digits
/// let out = b.mul_div(&a, &Amount::from_units(100).checked_add(&a).expect("sum"), Rounding::Down);
/// assert_eq!(out.map(|v| v.to_string()), Some("9.06610893".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// The empty amount.
    pub const ZERO: Self = Self(0);

    /// Exactly one whole unit.
    pub const ONE: Self = Self(SCALE);

    /// Smallest representable positive amount (`0.00000001`).
    pub const EPSILON: Self = Self(1);

    /// Largest raw value a `u128` can hold.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates an `Amount` from raw `10^-8` units.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Creates an `Amount` holding `units` whole units.
    pub const fn from_units(units: u64) -> Self {
        // u64::MAX * 10^8 < u128::MAX
        Self(units as u128 * SCALE)
    }

    /// Returns the raw `10^-8` unit count.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Whether no raw units are held.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole-unit part, fractional digits discarded.
    #[must_use]
    pub const fn trunc_units(&self) -> u128 {
        self.0 / SCALE
    }

    /// `self + other`, or `None` past [`Amount::MAX`].
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// `self - other`, or `None` when `other` is larger.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Saturating addition, clamped at [`Amount::MAX`].
    pub const fn saturating_add(&self, other: &Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction, clamped at zero.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Fixed-point multiplication: `self × other`, rounded as requested.
    ///
    /// Returns `None` on overflow of the raw product.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self, rounding: Rounding) -> Option<Self> {
        self.mul_div(other, &Self::ONE, rounding)
    }

    /// Fixed-point division: `self ÷ divisor`, rounded as requested.
    ///
    /// Returns `None` if `divisor` is zero or the scaled dividend overflows.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        self.mul_div(&Self::ONE, divisor, rounding)
    }

    /// Computes `self × numerator ÷ denominator` with a single rounding
    /// step on raw units.
    ///
    /// Because the intermediate product is kept at full precision, this
    /// is exact up to the final rounding, unlike a multiplication followed
    /// by a separately rounded division.
    ///
    /// Returns `None` if `denominator` is zero or the raw product
    /// overflows `u128`.
    #[must_use]
    pub const fn mul_div(
        &self,
        numerator: &Self,
        denominator: &Self,
        rounding: Rounding,
    ) -> Option<Self> {
        if denominator.0 == 0 {
            return None;
        }
        let product = match self.0.checked_mul(numerator.0) {
            Some(v) => v,
            None => return None,
        };
        let q = product / denominator.0;
        match rounding {
            Rounding::Down => Some(Self(q)),
            Rounding::Up => {
                if product % denominator.0 == 0 {
                    Some(Self(q))
                } else {
                    // q < product when the remainder is nonzero, so q + 1
                    // cannot overflow.
                    Some(Self(q + 1))
                }
            }
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / SCALE,
            self.0 % SCALE,
            width = DECIMALS as usize
        )
    }
}

impl FromStr for Amount {
    type Err = PairError;

    /// Parses `"123"`, `"123.4"` or `"0.00000001"`.  At most eight
    /// fractional digits are accepted; signs and exponents are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(PairError::InvalidAmount("empty amount"));
        }
        if frac_part.len() > DECIMALS as usize {
            return Err(PairError::InvalidAmount("more than eight fractional digits"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(PairError::InvalidAmount("non-digit character"));
        }

        let whole = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse::<u128>()
                .map_err(|_| PairError::InvalidAmount("integer part out of range"))?
        };
        let mut frac = if frac_part.is_empty() {
            0
        } else {
            frac_part
                .parse::<u128>()
                .map_err(|_| PairError::InvalidAmount("fractional part out of range"))?
        };
        for _ in frac_part.len()..DECIMALS as usize {
            frac *= 10;
        }

        whole
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or(PairError::Overflow("amount literal"))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
