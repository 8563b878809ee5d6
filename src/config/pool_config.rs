//! Configuration for a constant-product asset pair.

use serde::{Deserialize, Serialize};

use crate::domain::{AssetPair, FeeRate};
use crate::error::PairError;

fn default_share_symbol() -> String {
    String::from("LP")
}

const fn default_start_frozen() -> bool {
    true
}

/// Configuration for one constant-product pair (`x · y = k`).
///
/// Defines the immutable identity of a pool (its [`AssetPair`]) together
/// with the initial values of the admin-mutable settings.
///
/// # Defaults
///
/// When deserialized, `share_symbol` falls back to `"LP"` and
/// `start_frozen` to `true`: a new pool accepts no swaps until its admin
/// unfreezes it.
///
/// # Validation
///
/// - The pair must hold two distinct kinds (checked again here because a
///   deserialized pair bypasses [`AssetPair::new`]).
/// - The share symbol must not be blank.
///
/// The fee rate is not bounded.  A rate of `1` or more makes every swap
/// fail with [`PairError::AmountTooSmall`].
///
/// # Examples
///
/// ```
/// use pair_amm::config::PoolConfig;
/// use pair_amm::custody::Issuer;
/// use pair_amm::domain::{AssetPair, FeeRate};
///
/// let usd = Issuer::new("USD");
/// let eur = Issuer::new("EUR");
/// let pair = AssetPair::new(usd.kind(), eur.kind()).expect("distinct");
///
/// let config = PoolConfig::new(pair, FeeRate::from_basis_points(30))
///     .with_share_symbol("USD-EUR-LP")
///     .with_start_frozen(false);
/// assert!(config.validate().is_ok());
/// assert!(!config.start_frozen());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pair: AssetPair,
    fee_percentage: FeeRate,
    #[serde(default = "default_share_symbol")]
    share_symbol: String,
    #[serde(default = "default_start_frozen")]
    start_frozen: bool,
}

impl PoolConfig {
    /// A configuration with the default share symbol and a frozen start.
    #[must_use]
    pub fn new(pair: AssetPair, fee_percentage: FeeRate) -> Self {
        Self {
            pair,
            fee_percentage,
            share_symbol: default_share_symbol(),
            start_frozen: default_start_frozen(),
        }
    }

    /// Sets the ticker of the liquidity-share kind.
    #[must_use]
    pub fn with_share_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.share_symbol = symbol.into();
        self
    }

    /// Sets whether the pool starts frozen.
    #[must_use]
    pub const fn with_start_frozen(mut self, frozen: bool) -> Self {
        self.start_frozen = frozen;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InvalidConfiguration`] if the pair repeats a
    /// kind or the share symbol is blank.
    pub fn validate(&self) -> Result<(), PairError> {
        if self.pair.token1() == self.pair.token2() {
            return Err(PairError::InvalidConfiguration(
                "pair must hold two distinct asset kinds",
            ));
        }
        if self.share_symbol.trim().is_empty() {
            return Err(PairError::InvalidConfiguration(
                "share symbol must not be empty",
            ));
        }
        Ok(())
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Returns the initial fee rate.
    #[must_use]
    pub const fn fee_percentage(&self) -> FeeRate {
        self.fee_percentage
    }

    /// Returns the liquidity-share ticker.
    #[must_use]
    pub fn share_symbol(&self) -> &str {
        &self.share_symbol
    }

    /// Returns whether the pool starts frozen.
    #[must_use]
    pub const fn start_frozen(&self) -> bool {
        self.start_frozen
    }
}
