//! The two asset kinds traded by a pool, and swap directions over them.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AssetKind;
use crate::error::PairError;

/// An ordered pair of distinct asset kinds: `token1` and `token2`.
///
/// Unlike a canonically sorted pair, the order here is meaningful: it
/// fixes which reserve is `reserve1` and which swap is "1 → 2".
///
/// # Examples
///
/// ```
/// use pair_amm::custody::Issuer;
/// use pair_amm::domain::{AssetPair, SwapDirection};
///
/// let usd = Issuer::new("USD");
/// let eur = Issuer::new("EUR");
/// let pair = AssetPair::new(usd.kind(), eur.kind()).expect("distinct kinds");
///
/// assert_eq!(pair.direction_from(usd.kind()), Some(SwapDirection::Token1ToToken2));
/// assert_eq!(pair.direction_from(eur.kind()), Some(SwapDirection::Token2ToToken1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    token1: AssetKind,
    token2: AssetKind,
}

impl AssetPair {
    /// Creates a pair from two distinct kinds.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InvalidConfiguration`] if both kinds are equal.
    pub fn new(token1: AssetKind, token2: AssetKind) -> Result<Self, PairError> {
        if token1 == token2 {
            return Err(PairError::InvalidConfiguration(
                "asset pair requires two distinct kinds",
            ));
        }
        Ok(Self { token1, token2 })
    }

    /// The kind held in `reserve1`.
    #[must_use]
    pub const fn token1(&self) -> AssetKind {
        self.token1
    }

    /// The kind held in `reserve2`.
    #[must_use]
    pub const fn token2(&self) -> AssetKind {
        self.token2
    }

    /// Returns `true` if `kind` is one of the two kinds.
    #[must_use]
    pub fn contains(&self, kind: AssetKind) -> bool {
        self.token1 == kind || self.token2 == kind
    }

    /// Direction of a swap that sells `kind`, or `None` if `kind` is
    /// foreign to the pair.
    #[must_use]
    pub fn direction_from(&self, kind: AssetKind) -> Option<SwapDirection> {
        if kind == self.token1 {
            Some(SwapDirection::Token1ToToken2)
        } else if kind == self.token2 {
            Some(SwapDirection::Token2ToToken1)
        } else {
            None
        }
    }

    /// `(input kind, output kind)` for a swap in `direction`.
    #[must_use]
    pub const fn kinds_for(&self, direction: SwapDirection) -> (AssetKind, AssetKind) {
        match direction {
            SwapDirection::Token1ToToken2 => (self.token1, self.token2),
            SwapDirection::Token2ToToken1 => (self.token2, self.token1),
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token1, self.token2)
    }
}

/// Which way a swap moves value through the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell token1, receive token2.
    Token1ToToken2,
    /// Sell token2, receive token1.
    Token2ToToken1,
}

impl SwapDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Token1ToToken2 => Self::Token2ToToken1,
            Self::Token2ToToken1 => Self::Token1ToToken2,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token1ToToken2 => f.write_str("token1->token2"),
            Self::Token2ToToken1 => f.write_str("token2->token1"),
        }
    }
}
