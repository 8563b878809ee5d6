//! Explicit rounding direction for fixed-point division.

/// Rounding direction for every division performed on an
/// [`Amount`](super::Amount).
///
/// The pool never divides implicitly.  Its convention is to round
/// against the party receiving value:
///
/// | Quantity | Direction |
/// |----------|-----------|
/// | Swap output, effective input after fee | [`Rounding::Down`] |
/// | Exact-out input quote | [`Rounding::Up`] |
/// | Shares minted, assets redeemed | [`Rounding::Down`] |
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ceiling: any nonzero remainder adds one raw unit.
    Up,
    /// Floor: the remainder is discarded.
    Down,
}

impl Rounding {
    /// Whether a remainder bumps the quotient.
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Whether a remainder is truncated.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
