//! Mint and burn authority for one asset kind.

use super::AssetVault;
use crate::domain::{Amount, AssetKind};
use crate::error::{PairError, Rejected};
use crate::math::CheckedArithmetic;

/// The sole source and sink of one asset kind's units.
///
/// Creating an `Issuer` allocates a fresh [`AssetKind`]; only that issuer
/// can [`mint`](Self::mint) units of it.  The issuer tracks the total
/// supply: every unit ever minted and not yet burned is held in exactly
/// one [`AssetVault`], so the sum of all outstanding balances equals
/// [`total_supply`](Self::total_supply).
///
/// The pool uses its own private `Issuer` for liquidity shares; external
/// assets are modelled with the same type.
///
/// # Examples
///
/// ```
/// use pair_amm::custody::Issuer;
/// use pair_amm::domain::Amount;
///
/// let mut usd = Issuer::new("USD");
/// let vault = usd.mint(Amount::from_units(10)).expect("mint");
/// assert_eq!(usd.total_supply(), Amount::from_units(10));
///
/// let burned = usd.burn(vault).expect("same kind");
/// assert_eq!(burned, Amount::from_units(10));
/// assert_eq!(usd.total_supply(), Amount::ZERO);
/// ```
#[derive(Debug)]
pub struct Issuer {
    kind: AssetKind,
    symbol: String,
    total_supply: Amount,
}

impl Issuer {
    /// Creates an issuer for a brand-new asset kind.
    pub fn new(symbol: impl Into<String>) -> Self {
        let issuer = Self {
            kind: AssetKind::fresh(),
            symbol: symbol.into(),
            total_supply: Amount::ZERO,
        };
        tracing::debug!(kind = %issuer.kind, symbol = %issuer.symbol, "issuer created");
        issuer
    }

    /// The kind this issuer mints.
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Human-readable ticker.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Units minted and not yet burned.
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// An empty vault of this issuer's kind.
    pub const fn create_empty_vault(&self) -> AssetVault {
        AssetVault::create_empty(self.kind)
    }

    /// Creates `amount` new units.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Overflow`] if the supply would overflow; the
    /// supply is unchanged.
    pub fn mint(&mut self, amount: Amount) -> Result<AssetVault, PairError> {
        self.total_supply = self.total_supply.safe_add(&amount)?;
        tracing::debug!(kind = %self.kind, %amount, supply = %self.total_supply, "minted");
        Ok(AssetVault::with_balance(self.kind, amount))
    }

    /// Destroys `vault` and removes its balance from the supply.
    ///
    /// Returns the amount burned.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::TypeMismatch`] (with the vault) if it belongs
    /// to another issuer.
    pub fn burn(&mut self, vault: AssetVault) -> Result<Amount, Rejected<AssetVault>> {
        if vault.kind() != self.kind {
            let err = PairError::TypeMismatch {
                expected: self.kind,
                found: vault.kind(),
            };
            return Err(Rejected::new(err, vault));
        }
        if vault.balance() > self.total_supply {
            return Err(Rejected::new(
                PairError::Overflow("burn exceeds total supply"),
                vault,
            ));
        }
        let amount = vault.into_balance();
        self.total_supply = self.total_supply.saturating_sub(&amount);
        tracing::debug!(kind = %self.kind, %amount, supply = %self.total_supply, "burned");
        Ok(amount)
    }

    /// Burns a vault whose kind the caller already checked.
    pub(crate) fn retire(&mut self, vault: AssetVault) -> Amount {
        debug_assert_eq!(vault.kind(), self.kind, "retire across asset kinds");
        let amount = vault.into_balance();
        debug_assert!(amount <= self.total_supply, "retire beyond supply");
        self.total_supply = self.total_supply.saturating_sub(&amount);
        amount
    }
}
