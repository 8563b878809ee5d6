//! Move-only custody of a single asset kind.

use core::mem;

use crate::domain::{Amount, AssetKind};
use crate::error::{PairError, Rejected};
use crate::math::CheckedArithmetic;

/// A balance of exactly one asset kind with linear ownership.
///
/// `AssetVault` is neither `Clone` nor `Copy`: the only ways to move value
/// between vaults are [`withdraw`](Self::withdraw) (split) and
/// [`deposit`](Self::deposit) (merge, consuming the argument).  New value
/// enters only through [`Issuer::mint`](super::Issuer::mint) and leaves
/// only through [`Issuer::burn`](super::Issuer::burn).
///
/// Dropping a vault that still holds a balance silently removes those
/// units from circulation without updating the issuer's supply.  The
/// destructor reports such leaks at `error` level; use
/// [`destroy`](Self::destroy) for empty vaults and `Issuer::burn`
/// otherwise.
///
/// # Examples
///
/// ```
/// use pair_amm::custody::Issuer;
/// use pair_amm::domain::Amount;
///
/// let mut usd = Issuer::new("USD");
/// let mut wallet = usd.mint(Amount::from_units(50)).expect("mint");
///
/// let payment = wallet.withdraw(Amount::from_units(20)).expect("enough funds");
/// assert_eq!(wallet.balance(), Amount::from_units(30));
///
/// wallet.deposit(payment).expect("same kind");
/// assert_eq!(wallet.balance(), Amount::from_units(50));
/// usd.burn(wallet).expect("burn");
/// ```
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a vault destroys its balance"]
pub struct AssetVault {
    kind: AssetKind,
    balance: Amount,
}

impl AssetVault {
    /// Creates an empty vault for `kind`.
    pub const fn create_empty(kind: AssetKind) -> Self {
        Self {
            kind,
            balance: Amount::ZERO,
        }
    }

    /// Creates a vault holding `balance`.  Only issuers and the pool's
    /// committed transfers may call this.
    pub(crate) const fn with_balance(kind: AssetKind, balance: Amount) -> Self {
        Self { kind, balance }
    }

    /// The asset kind this vault holds.
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Current balance.
    pub const fn balance(&self) -> Amount {
        self.balance
    }

    /// Returns `true` if the balance is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.balance.is_zero()
    }

    /// Splits `amount` off into a new vault of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InsufficientBalance`] if `amount` exceeds the
    /// balance; the vault is left untouched.
    pub fn withdraw(&mut self, amount: Amount) -> Result<AssetVault, PairError> {
        let remaining = self
            .balance
            .checked_sub(&amount)
            .ok_or(PairError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            })?;
        self.balance = remaining;
        Ok(Self::with_balance(self.kind, amount))
    }

    /// Merges `from` into this vault, consuming it.
    ///
    /// # Errors
    ///
    /// - [`PairError::TypeMismatch`] if `from` holds another kind.
    /// - [`PairError::Overflow`] if the merged balance is unrepresentable.
    ///
    /// In both cases `from` is handed back untouched.
    pub fn deposit(&mut self, from: AssetVault) -> Result<(), Rejected<AssetVault>> {
        if from.kind != self.kind {
            let err = PairError::TypeMismatch {
                expected: self.kind,
                found: from.kind,
            };
            return Err(Rejected::new(err, from));
        }
        match self.balance.safe_add(&from.balance) {
            Ok(total) => {
                self.balance = total;
                let _ = from.into_balance();
                Ok(())
            }
            Err(err) => Err(Rejected::new(err, from)),
        }
    }

    /// Consumes an empty vault.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Precondition`] with the vault if it still holds
    /// a balance.
    pub fn destroy(self) -> Result<(), Rejected<AssetVault>> {
        if self.balance.is_zero() {
            Ok(())
        } else {
            Err(Rejected::new(
                PairError::Precondition("cannot destroy a vault with a nonzero balance"),
                self,
            ))
        }
    }

    /// Empties the vault and returns what it held.
    pub(crate) fn into_balance(mut self) -> Amount {
        mem::take(&mut self.balance)
    }

    /// Merges a vault whose kind and resulting balance were validated by
    /// the caller.
    pub(crate) fn absorb(&mut self, from: AssetVault) {
        debug_assert_eq!(self.kind, from.kind, "absorb across asset kinds");
        let incoming = from.into_balance();
        debug_assert!(
            self.balance.checked_add(&incoming).is_some(),
            "absorb overflow"
        );
        self.balance = self.balance.saturating_add(&incoming);
    }

    /// Splits off an amount the caller has proven to be available.
    pub(crate) fn take(&mut self, amount: Amount) -> AssetVault {
        debug_assert!(amount <= self.balance, "take beyond balance");
        self.balance = self.balance.saturating_sub(&amount);
        Self::with_balance(self.kind, amount)
    }
}

impl Drop for AssetVault {
    fn drop(&mut self) {
        if !self.balance.is_zero() {
            tracing::error!(
                kind = %self.kind,
                balance = %self.balance,
                "asset vault dropped with a nonzero balance"
            );
        }
    }
}
