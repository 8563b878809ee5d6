//! Constant-product pricing and swap execution.
//!
//! # Swap Algorithm (token1 → token2)
//!
//! 1. `effective_in = amount_in × (1 − fee)` (rounded down)
//! 2. `amount_out = reserve2 × effective_in / (reserve1 + effective_in)` (rounded down)
//! 3. `reserve1 += amount_in` (the fee remainder stays in the pool)
//! 4. `reserve2 -= amount_out`
//!
//! The reverse direction swaps the roles of the reserves.
//!
//! # Invariant
//!
//! `reserve1 × reserve2` never decreases across a swap, and grows
//! strictly whenever the fee and the input are both nonzero.

use crate::custody::AssetVault;
use crate::domain::{Amount, Rounding, SwapDirection};
use crate::error::{PairError, Rejected};
use crate::events::PoolEvent;
use crate::math::CheckedArithmetic;

use super::state::PoolState;

/// Output paid for selling exactly `amount_in` against the given reserves.
///
/// `reserve_out × amount_in / (reserve_in + amount_in)`, rounded down so
/// the pool never pays out more than the curve allows.
///
/// # Errors
///
/// - [`PairError::Overflow`] if an intermediate value overflows.
/// - [`PairError::DivisionByZero`] if both `reserve_in` and `amount_in`
///   are zero.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Amount;
/// use pair_amm::pool::quote_exact_in;
///
/// let out = quote_exact_in(
///     Amount::from_raw(997_000_000),
///     Amount::from_units(100),
///     Amount::from_units(100),
/// )
/// .expect("quote");
/// assert_eq!(out.to_string(), "9.06610893");
/// ```
pub fn quote_exact_in(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<Amount, PairError> {
    let denominator = reserve_in.safe_add(&amount_in)?;
    reserve_out.safe_mul_div(&amount_in, &denominator, Rounding::Down)
}

/// Input required to receive exactly `amount_out` from the given reserves.
///
/// `reserve_in × amount_out / (reserve_out − amount_out)`, rounded up so
/// the pool is never underpaid.  The result is a curve input, before any
/// fee.
///
/// # Errors
///
/// - [`PairError::InsufficientReserve`] if `amount_out ≥ reserve_out`.
/// - [`PairError::Overflow`] if an intermediate value overflows.
pub fn quote_exact_out(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<Amount, PairError> {
    if amount_out >= reserve_out {
        return Err(PairError::InsufficientReserve);
    }
    let denominator = reserve_out.safe_sub(&amount_out)?;
    reserve_in.safe_mul_div(&amount_out, &denominator, Rounding::Up)
}

/// The validated outcome of a swap, computed before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SwapPlan {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
}

impl PoolState {
    /// Bare curve output for `amount_in` in `direction`.
    pub(super) fn curve_quote_in(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, PairError> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        quote_exact_in(amount_in, reserve_in, reserve_out)
    }

    /// Bare curve input for `amount_out` in `direction`.
    pub(super) fn curve_quote_out(
        &self,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<Amount, PairError> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        quote_exact_out(amount_out, reserve_in, reserve_out)
    }

    /// Curve output for `amount_in` in `direction`, fee deducted.
    pub(super) fn quote_in(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, PairError> {
        let effective_in = self.fee_percentage.net_of_fee(amount_in)?;
        self.curve_quote_in(direction, effective_in)
    }

    /// Gross input, fee included, needed for `amount_out` in `direction`.
    ///
    /// # Errors
    ///
    /// Besides the curve errors, returns [`PairError::AmountTooSmall`] if
    /// the fee consumes the whole input.
    pub(super) fn quote_out(
        &self,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<Amount, PairError> {
        let effective_in = self.curve_quote_out(direction, amount_out)?;
        let complement = self.fee_percentage.complement();
        if complement.is_zero() {
            return Err(PairError::AmountTooSmall);
        }
        effective_in
            .checked_div(&complement, Rounding::Up)
            .ok_or(PairError::Overflow("gross input overflow"))
    }

    fn plan_swap(
        &self,
        from: &AssetVault,
        fixed: Option<SwapDirection>,
    ) -> Result<SwapPlan, PairError> {
        if self.frozen {
            return Err(PairError::PoolFrozen);
        }
        let direction = match fixed {
            Some(direction) => {
                let (expected, _) = self.pair.kinds_for(direction);
                if from.kind() != expected {
                    return Err(PairError::TypeMismatch {
                        expected,
                        found: from.kind(),
                    });
                }
                direction
            }
            None => self
                .pair
                .direction_from(from.kind())
                .ok_or(PairError::TypeMismatch {
                    expected: self.pair.token1(),
                    found: from.kind(),
                })?,
        };
        let amount_in = from.balance();
        if amount_in.is_zero() {
            return Err(PairError::EmptyVault);
        }
        let amount_out = self.quote_in(direction, amount_in)?;
        if amount_out.is_zero() {
            return Err(PairError::AmountTooSmall);
        }
        let (reserve_in, _) = self.reserves_for(direction);
        let _ = reserve_in.safe_add(&amount_in)?;
        Ok(SwapPlan {
            direction,
            amount_in,
            amount_out,
        })
    }

    /// Sells `from` for the counter asset.
    ///
    /// With `fixed` set, the vault must hold that direction's input kind;
    /// otherwise the direction follows from the vault.
    pub(super) fn swap(
        &mut self,
        from: AssetVault,
        fixed: Option<SwapDirection>,
    ) -> Result<AssetVault, Rejected<AssetVault>> {
        let plan = match self.plan_swap(&from, fixed) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::debug!(kind = %from.kind(), balance = %from.balance(), %err, "swap rejected");
                return Err(Rejected::new(err, from));
            }
        };
        tracing::debug!(
            direction = %plan.direction,
            amount_in = %plan.amount_in,
            amount_out = %plan.amount_out,
            "swap planned"
        );

        let k_before = self.invariant();
        let (reserve_in, reserve_out) = self.reserves_for_mut(plan.direction);
        reserve_in.absorb(from);
        let out = reserve_out.take(plan.amount_out);
        debug_assert!(
            match (k_before, self.invariant()) {
                (Some(before), Some(after)) => after >= before,
                _ => true,
            },
            "constant product decreased"
        );
        self.debug_check();

        self.emit(PoolEvent::Trade {
            direction: plan.direction,
            amount_in: plan.amount_in,
            amount_out: plan.amount_out,
        });
        Ok(out)
    }
}
