//! Notifications the pool emits for the host's log collaborator.
//!
//! The pool never formats or stores logs itself: each committed mutation
//! queues [`PoolEvent`]s that reach the configured [`EventSink`] once the
//! pool lock is released.
//! Sinks are fire-and-forget and cannot fail the operation.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::domain::{Amount, AssetKind, FeeRate, SwapDirection};

/// Something observable that happened to the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PoolEvent {
    /// The pool was created.
    Initialized {
        /// Kind held in reserve1.
        token1: AssetKind,
        /// Kind held in reserve2.
        token2: AssetKind,
        /// Kind of the pool's liquidity shares.
        share_kind: AssetKind,
    },
    /// Assets entered a reserve.
    TokensDeposited {
        /// Reserve kind.
        kind: AssetKind,
        /// Amount deposited.
        amount: Amount,
    },
    /// Assets left a reserve.
    TokensWithdrawn {
        /// Reserve kind.
        kind: AssetKind,
        /// Amount withdrawn.
        amount: Amount,
    },
    /// Liquidity shares were created.
    SharesMinted {
        /// Shares minted.
        amount: Amount,
    },
    /// Liquidity shares were destroyed.
    SharesBurned {
        /// Shares burned.
        amount: Amount,
    },
    /// The admin changed the fee rate.
    FeeUpdated {
        /// New rate.
        fee_percentage: FeeRate,
    },
    /// A swap was executed.
    Trade {
        /// Which way value moved.
        direction: SwapDirection,
        /// Full amount paid in, fee included.
        amount_in: Amount,
        /// Amount paid out.
        amount_out: Amount,
    },
}

/// Receives pool events.
///
/// Called after the pool lock is released, so a sink may call back into
/// the pool.  The events of one operation arrive in commit order.
pub trait EventSink: Send + Sync {
    /// Records one event.
    fn emit(&self, event: &PoolEvent);
}

/// Forwards every event to `tracing` at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &PoolEvent) {
        match event {
            PoolEvent::Initialized {
                token1,
                token2,
                share_kind,
            } => tracing::info!(%token1, %token2, %share_kind, "pool initialized"),
            PoolEvent::TokensDeposited { kind, amount } => {
                tracing::info!(%kind, %amount, "tokens deposited");
            }
            PoolEvent::TokensWithdrawn { kind, amount } => {
                tracing::info!(%kind, %amount, "tokens withdrawn");
            }
            PoolEvent::SharesMinted { amount } => tracing::info!(%amount, "shares minted"),
            PoolEvent::SharesBurned { amount } => tracing::info!(%amount, "shares burned"),
            PoolEvent::FeeUpdated { fee_percentage } => {
                tracing::info!(%fee_percentage, "fee updated");
            }
            PoolEvent::Trade {
                direction,
                amount_in,
                amount_out,
            } => tracing::info!(%direction, %amount_in, %amount_out, "trade"),
        }
    }
}

/// Keeps every event in memory; cloning shares the same buffer.
///
/// # Examples
///
/// ```
/// use pair_amm::events::{EventSink, PoolEvent, RecordingSink};
/// use pair_amm::domain::Amount;
///
/// let sink = RecordingSink::new();
/// sink.emit(&PoolEvent::SharesMinted { amount: Amount::ONE });
/// assert_eq!(sink.events().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<PoolEvent>>>,
}

impl RecordingSink {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PoolEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<PoolEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &PoolEvent) {
        self.events.lock().push(event.clone());
    }
}
