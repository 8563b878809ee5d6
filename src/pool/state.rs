//! The pool singleton and its read-only views.

use std::sync::Arc;

use serde::Serialize;

use crate::config::PoolConfig;
use crate::custody::{AssetVault, Issuer};
use crate::domain::{Amount, AssetKind, AssetPair, FeeRate, SwapDirection};
use crate::events::{EventSink, PoolEvent};
use crate::math::invariant_product;

/// Current reserve balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolAmounts {
    /// Balance of `reserve1`.
    pub token1: Amount,
    /// Balance of `reserve2`.
    pub token2: Amount,
}

/// A consistent copy of every observable pool field, taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSnapshot {
    /// The traded pair.
    pub pair: AssetPair,
    /// Balance of `reserve1`.
    pub reserve1: Amount,
    /// Balance of `reserve2`.
    pub reserve2: Amount,
    /// Outstanding liquidity shares.
    pub total_supply: Amount,
    /// Kind of the liquidity shares.
    pub share_kind: AssetKind,
    /// Current swap fee.
    pub fee_percentage: FeeRate,
    /// Whether swaps are refused.
    pub is_frozen: bool,
}

/// Everything one pool owns.
///
/// Mutated only by the swap, liquidity and admin code in this module
/// tree, always through a plan-then-commit sequence while the handle's
/// lock is held.  Events raised by a commit are queued here and handed
/// to the sink only after the lock is released.
pub(crate) struct PoolState {
    pub(super) pair: AssetPair,
    pub(super) reserve1: AssetVault,
    pub(super) reserve2: AssetVault,
    pub(super) shares: Issuer,
    pub(super) fee_percentage: FeeRate,
    pub(super) frozen: bool,
    pub(super) proxy_epoch: u64,
    sink: Arc<dyn EventSink>,
    pending: Vec<PoolEvent>,
}

/// Events taken out of a [`PoolState`], to be delivered once the pool
/// lock is no longer held.
#[must_use]
pub(super) struct PendingEvents {
    sink: Arc<dyn EventSink>,
    events: Vec<PoolEvent>,
}

impl PendingEvents {
    /// Hands every queued event to the sink, in commit order.
    pub(super) fn deliver(self) {
        for event in &self.events {
            self.sink.emit(event);
        }
    }
}

impl PoolState {
    /// Builds an empty pool; the config must already be validated.
    pub(super) fn new(config: &PoolConfig, sink: Arc<dyn EventSink>) -> Self {
        let pair = config.pair();
        let mut state = Self {
            pair,
            reserve1: AssetVault::create_empty(pair.token1()),
            reserve2: AssetVault::create_empty(pair.token2()),
            shares: Issuer::new(config.share_symbol()),
            fee_percentage: config.fee_percentage(),
            frozen: config.start_frozen(),
            proxy_epoch: 0,
            sink,
            pending: Vec::new(),
        };
        state.emit(PoolEvent::Initialized {
            token1: pair.token1(),
            token2: pair.token2(),
            share_kind: state.shares.kind(),
        });
        state
    }

    /// Queues `event` for delivery after the current operation.
    pub(super) fn emit(&mut self, event: PoolEvent) {
        self.pending.push(event);
    }

    /// Drains the queue; the caller delivers it after unlocking.
    pub(super) fn take_events(&mut self) -> PendingEvents {
        PendingEvents {
            sink: Arc::clone(&self.sink),
            events: std::mem::take(&mut self.pending),
        }
    }

    /// Delivers queued events immediately, for tests driving the state
    /// without a handle.
    #[cfg(test)]
    pub(super) fn flush_events(&mut self) {
        self.take_events().deliver();
    }

    pub(super) const fn total_supply(&self) -> Amount {
        self.shares.total_supply()
    }

    pub(super) const fn share_kind(&self) -> AssetKind {
        self.shares.kind()
    }

    /// `(reserve_in, reserve_out)` balances for a trade in `direction`.
    pub(super) const fn reserves_for(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::Token1ToToken2 => (self.reserve1.balance(), self.reserve2.balance()),
            SwapDirection::Token2ToToken1 => (self.reserve2.balance(), self.reserve1.balance()),
        }
    }

    /// `(reserve_in, reserve_out)` vaults for a trade in `direction`.
    pub(super) fn reserves_for_mut(
        &mut self,
        direction: SwapDirection,
    ) -> (&mut AssetVault, &mut AssetVault) {
        match direction {
            SwapDirection::Token1ToToken2 => (&mut self.reserve1, &mut self.reserve2),
            SwapDirection::Token2ToToken1 => (&mut self.reserve2, &mut self.reserve1),
        }
    }

    /// Raw `reserve1 × reserve2`, `None` on overflow.
    pub(super) const fn invariant(&self) -> Option<u128> {
        invariant_product(self.reserve1.balance(), self.reserve2.balance())
    }

    pub(super) const fn amounts(&self) -> PoolAmounts {
        PoolAmounts {
            token1: self.reserve1.balance(),
            token2: self.reserve2.balance(),
        }
    }

    pub(super) const fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            pair: self.pair,
            reserve1: self.reserve1.balance(),
            reserve2: self.reserve2.balance(),
            total_supply: self.shares.total_supply(),
            share_kind: self.shares.kind(),
            fee_percentage: self.fee_percentage,
            is_frozen: self.frozen,
        }
    }

    /// Asserts the structural invariants after a commit.
    ///
    /// - Each reserve holds the kind of its side of the pair.
    /// - Once shares exist, both reserves are nonzero.
    pub(super) fn debug_check(&self) {
        debug_assert_eq!(self.reserve1.kind(), self.pair.token1());
        debug_assert_eq!(self.reserve2.kind(), self.pair.token2());
        debug_assert!(
            self.total_supply().is_zero()
                || (!self.reserve1.is_empty() && !self.reserve2.is_empty()),
            "outstanding shares over an empty reserve"
        );
    }
}
