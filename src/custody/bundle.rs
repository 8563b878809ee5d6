//! Paired custody of one vault of each pool asset.

use core::mem;

use super::AssetVault;
use crate::domain::{Amount, AssetPair};
use crate::error::Rejected;

/// Holds one [`AssetVault`] of each kind of an [`AssetPair`] at once.
///
/// A bundle moves a two-sided deposit (or redemption) as a single value,
/// so neither side can be separated from the other in transit.
/// `withdraw_token1`/`withdraw_token2` hand out the entire held vault in
/// O(1) by swapping an empty vault into its place.
///
/// Dropping a nonempty bundle drops both held vaults; use
/// [`into_vaults`](Self::into_vaults) to take them out instead.
///
/// # Examples
///
/// ```
/// use pair_amm::custody::{Issuer, TokenBundle};
/// use pair_amm::domain::{Amount, AssetPair};
///
/// let mut usd = Issuer::new("USD");
/// let mut eur = Issuer::new("EUR");
/// let pair = AssetPair::new(usd.kind(), eur.kind()).expect("distinct");
///
/// let mut bundle = TokenBundle::new(pair);
/// bundle.deposit_token1(usd.mint(Amount::from_units(3)).expect("mint")).expect("kind");
/// bundle.deposit_token2(eur.mint(Amount::from_units(4)).expect("mint")).expect("kind");
/// assert_eq!(bundle.token1_balance(), Amount::from_units(3));
///
/// let dollars = bundle.withdraw_token1();
/// assert_eq!(dollars.balance(), Amount::from_units(3));
/// assert!(bundle.token1_balance().is_zero());
/// # usd.burn(dollars).expect("burn");
/// # eur.burn(bundle.withdraw_token2()).expect("burn");
/// ```
#[derive(Debug)]
#[must_use = "dropping a bundle destroys both held vaults"]
pub struct TokenBundle {
    pair: AssetPair,
    token1: AssetVault,
    token2: AssetVault,
}

impl TokenBundle {
    /// An empty bundle for `pair`.
    pub const fn new(pair: AssetPair) -> Self {
        Self {
            pair,
            token1: AssetVault::create_empty(pair.token1()),
            token2: AssetVault::create_empty(pair.token2()),
        }
    }

    /// Wraps two existing vaults; `token1` and `token2` must hold distinct
    /// kinds.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InvalidConfiguration`](crate::error::PairError::InvalidConfiguration),
    /// with both vaults, if
    /// they hold the same kind.
    pub fn from_vaults(
        token1: AssetVault,
        token2: AssetVault,
    ) -> Result<Self, Rejected<(AssetVault, AssetVault)>> {
        match AssetPair::new(token1.kind(), token2.kind()) {
            Ok(pair) => Ok(Self {
                pair,
                token1,
                token2,
            }),
            Err(err) => Err(Rejected::new(err, (token1, token2))),
        }
    }

    /// The kinds this bundle carries.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Balance of the token1 side.
    pub const fn token1_balance(&self) -> Amount {
        self.token1.balance()
    }

    /// Balance of the token2 side.
    pub const fn token2_balance(&self) -> Amount {
        self.token2.balance()
    }

    /// Returns `true` if both sides are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.token1.is_empty() && self.token2.is_empty()
    }

    /// Merges `vault` into the token1 side.
    ///
    /// # Errors
    ///
    /// Propagates [`AssetVault::deposit`] failures, handing `vault` back.
    pub fn deposit_token1(&mut self, vault: AssetVault) -> Result<(), Rejected<AssetVault>> {
        self.token1.deposit(vault)
    }

    /// Merges `vault` into the token2 side.
    ///
    /// # Errors
    ///
    /// Propagates [`AssetVault::deposit`] failures, handing `vault` back.
    pub fn deposit_token2(&mut self, vault: AssetVault) -> Result<(), Rejected<AssetVault>> {
        self.token2.deposit(vault)
    }

    /// Takes the entire token1 vault, leaving an empty one in its place.
    pub fn withdraw_token1(&mut self) -> AssetVault {
        let empty = AssetVault::create_empty(self.pair.token1());
        mem::replace(&mut self.token1, empty)
    }

    /// Takes the entire token2 vault, leaving an empty one in its place.
    pub fn withdraw_token2(&mut self) -> AssetVault {
        let empty = AssetVault::create_empty(self.pair.token2());
        mem::replace(&mut self.token2, empty)
    }

    /// Releases both vaults as `(token1, token2)`.
    pub fn into_vaults(self) -> (AssetVault, AssetVault) {
        (self.token1, self.token2)
    }

    /// Builds a bundle from vaults whose kinds the caller validated.
    pub(crate) fn assemble(pair: AssetPair, token1: AssetVault, token2: AssetVault) -> Self {
        Self {
            pair,
            token1,
            token2,
        }
    }
}
