//! Liquidity shares: bootstrap, add, remove and donate.
//!
//! Shares are fixed-point amounts of the pool's private share kind.  The
//! first provider receives exactly `1.0` share at bootstrap; later
//! deposits and redemptions are priced as a fraction of the reserves on
//! a `10^4` percentage scale:
//!
//! ```text
//! add:    pct_i = deposit_i × 10^4 / reserve_i
//!         minted = supply × min(pct_1, pct_2) / 10^4
//! remove: pct = shares × 10^4 / supply
//!         paid_i = reserve_i × pct / 10^4
//! ```
//!
//! Every division rounds down, so both directions favour the pool.  The
//! excess of a disproportionate deposit stays in the reserves and accrues
//! to all share holders.

use crate::custody::{AssetVault, TokenBundle};
use crate::domain::{Amount, Rounding};
use crate::error::{PairError, Rejected};
use crate::events::PoolEvent;
use crate::math::{CheckedArithmetic, PERCENT_SCALE};

use super::state::PoolState;

impl PoolState {
    /// Checks that `bundle` carries this pool's kinds and fits in the
    /// reserves.
    fn check_deposit(&self, bundle: &TokenBundle) -> Result<(), PairError> {
        let theirs = bundle.pair();
        if theirs.token1() != self.pair.token1() {
            return Err(PairError::TypeMismatch {
                expected: self.pair.token1(),
                found: theirs.token1(),
            });
        }
        if theirs.token2() != self.pair.token2() {
            return Err(PairError::TypeMismatch {
                expected: self.pair.token2(),
                found: theirs.token2(),
            });
        }
        let _ = self.reserve1.balance().safe_add(&bundle.token1_balance())?;
        let _ = self.reserve2.balance().safe_add(&bundle.token2_balance())?;
        Ok(())
    }

    /// Moves both sides of a checked bundle into the reserves.
    fn commit_deposit(&mut self, bundle: TokenBundle) {
        let (token1, token2) = bundle.into_vaults();
        for vault in [token1, token2] {
            let kind = vault.kind();
            let amount = vault.balance();
            if kind == self.pair.token1() {
                self.reserve1.absorb(vault);
            } else {
                self.reserve2.absorb(vault);
            }
            if !amount.is_zero() {
                self.emit(PoolEvent::TokensDeposited { kind, amount });
            }
        }
    }

    fn plan_bootstrap(&self, bundle: &TokenBundle) -> Result<(), PairError> {
        if !self.total_supply().is_zero() {
            return Err(PairError::AlreadyInitialized);
        }
        if bundle.token1_balance().is_zero() || bundle.token2_balance().is_zero() {
            return Err(PairError::EmptyVault);
        }
        self.check_deposit(bundle)
    }

    /// Seeds the pool and mints the first `1.0` share.
    pub(super) fn bootstrap(
        &mut self,
        bundle: TokenBundle,
    ) -> Result<AssetVault, Rejected<TokenBundle>> {
        if let Err(err) = self.plan_bootstrap(&bundle) {
            return Err(Rejected::new(err, bundle));
        }
        let shares = match self.shares.mint(Amount::ONE) {
            Ok(shares) => shares,
            Err(err) => return Err(Rejected::new(err, bundle)),
        };
        tracing::info!(
            token1 = %bundle.token1_balance(),
            token2 = %bundle.token2_balance(),
            "pool bootstrapped"
        );
        self.commit_deposit(bundle);
        self.emit(PoolEvent::SharesMinted {
            amount: shares.balance(),
        });
        self.debug_check();
        Ok(shares)
    }

    /// Shares minted for `bundle`, or why none can be.
    fn plan_add(&self, bundle: &TokenBundle) -> Result<Amount, PairError> {
        let supply = self.total_supply();
        if supply.is_zero() {
            return Err(PairError::NotInitialized);
        }
        self.check_deposit(bundle)?;
        let (deposit1, deposit2) = (bundle.token1_balance(), bundle.token2_balance());
        if deposit1.is_zero() || deposit2.is_zero() {
            return Err(PairError::EmptyVault);
        }
        let pct1 = deposit1.safe_mul_div(&PERCENT_SCALE, &self.reserve1.balance(), Rounding::Down)?;
        let pct2 = deposit2.safe_mul_div(&PERCENT_SCALE, &self.reserve2.balance(), Rounding::Down)?;
        let liquidity_pct = pct1.min(pct2);
        if liquidity_pct.is_zero() {
            return Err(PairError::LiquidityTooSmall);
        }
        let minted = supply.safe_mul_div(&liquidity_pct, &PERCENT_SCALE, Rounding::Down)?;
        if minted.is_zero() {
            return Err(PairError::LiquidityTooSmall);
        }
        tracing::debug!(%pct1, %pct2, %minted, "add liquidity planned");
        Ok(minted)
    }

    /// Deposits `bundle` and mints shares for its smaller proportion.
    pub(super) fn add_liquidity(
        &mut self,
        bundle: TokenBundle,
    ) -> Result<AssetVault, Rejected<TokenBundle>> {
        let minted = match self.plan_add(&bundle) {
            Ok(minted) => minted,
            Err(err) => return Err(Rejected::new(err, bundle)),
        };
        let shares = match self.shares.mint(minted) {
            Ok(shares) => shares,
            Err(err) => return Err(Rejected::new(err, bundle)),
        };
        self.commit_deposit(bundle);
        self.emit(PoolEvent::SharesMinted { amount: minted });
        self.debug_check();
        Ok(shares)
    }

    /// Reserve amounts paid out for `shares`, or why none can be.
    fn plan_remove(&self, shares: &AssetVault) -> Result<(Amount, Amount), PairError> {
        if shares.kind() != self.share_kind() {
            return Err(PairError::TypeMismatch {
                expected: self.share_kind(),
                found: shares.kind(),
            });
        }
        let balance = shares.balance();
        if balance.is_zero() {
            return Err(PairError::EmptyVault);
        }
        let supply = self.total_supply();
        if balance >= supply {
            return Err(PairError::Precondition(
                "cannot redeem the entire share supply",
            ));
        }
        let liquidity_pct = balance.safe_mul_div(&PERCENT_SCALE, &supply, Rounding::Down)?;
        if liquidity_pct.is_zero() {
            return Err(PairError::LiquidityTooSmall);
        }
        let paid1 = self
            .reserve1
            .balance()
            .safe_mul_div(&liquidity_pct, &PERCENT_SCALE, Rounding::Down)?;
        let paid2 = self
            .reserve2
            .balance()
            .safe_mul_div(&liquidity_pct, &PERCENT_SCALE, Rounding::Down)?;
        tracing::debug!(%liquidity_pct, %paid1, %paid2, "remove liquidity planned");
        Ok((paid1, paid2))
    }

    /// Burns `shares` and pays out the proportional reserves.
    pub(super) fn remove_liquidity(
        &mut self,
        shares: AssetVault,
    ) -> Result<TokenBundle, Rejected<AssetVault>> {
        let (paid1, paid2) = match self.plan_remove(&shares) {
            Ok(paid) => paid,
            Err(err) => return Err(Rejected::new(err, shares)),
        };
        let burned = self.shares.retire(shares);
        let token1 = self.reserve1.take(paid1);
        let token2 = self.reserve2.take(paid2);
        self.emit(PoolEvent::SharesBurned { amount: burned });
        for vault in [&token1, &token2] {
            if !vault.is_empty() {
                self.emit(PoolEvent::TokensWithdrawn {
                    kind: vault.kind(),
                    amount: vault.balance(),
                });
            }
        }
        self.debug_check();
        Ok(TokenBundle::assemble(self.pair, token1, token2))
    }

    /// Retires `shares` without paying anything out.
    pub(super) fn burn_shares(
        &mut self,
        shares: AssetVault,
    ) -> Result<Amount, Rejected<AssetVault>> {
        if shares.kind() != self.share_kind() {
            let err = PairError::TypeMismatch {
                expected: self.share_kind(),
                found: shares.kind(),
            };
            return Err(Rejected::new(err, shares));
        }
        let burned = self.shares.retire(shares);
        if !burned.is_zero() {
            self.emit(PoolEvent::SharesBurned { amount: burned });
        }
        tracing::debug!(%burned, supply = %self.total_supply(), "shares burned");
        self.debug_check();
        Ok(burned)
    }

    /// Adds both sides of `bundle` to the reserves without minting.
    pub(super) fn donate_liquidity(
        &mut self,
        bundle: TokenBundle,
    ) -> Result<(), Rejected<TokenBundle>> {
        let planned = if bundle.is_empty() {
            Err(PairError::EmptyVault)
        } else {
            self.check_deposit(&bundle)
        };
        if let Err(err) = planned {
            return Err(Rejected::new(err, bundle));
        }
        self.commit_deposit(bundle);
        self.debug_check();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::PoolConfig;
    use crate::custody::Issuer;
    use crate::domain::{AssetPair, FeeRate};
    use crate::events::RecordingSink;

    struct Fixture {
        state: PoolState,
        a: Issuer,
        b: Issuer,
        sink: RecordingSink,
    }

    fn fixture() -> Fixture {
        let a = Issuer::new("A");
        let b = Issuer::new("B");
        let Ok(pair) = AssetPair::new(a.kind(), b.kind()) else {
            panic!("distinct kinds");
        };
        let sink = RecordingSink::new();
        let config = PoolConfig::new(pair, FeeRate::from_basis_points(30)).with_start_frozen(false);
        let mut state = PoolState::new(&config, Arc::new(sink.clone()));
        state.flush_events();
        sink.drain();
        Fixture { state, a, b, sink }
    }

    impl Fixture {
        fn bundle(&mut self, raw1: u128, raw2: u128) -> TokenBundle {
            let (Ok(v1), Ok(v2)) = (
                self.a.mint(Amount::from_raw(raw1)),
                self.b.mint(Amount::from_raw(raw2)),
            ) else {
                panic!("mint");
            };
            TokenBundle::assemble(self.state.pair, v1, v2)
        }

        /// Bootstraps 100/100 and returns the `1.0` share vault.
        fn bootstrapped(&mut self) -> AssetVault {
            let bundle = self.bundle(100 * UNIT, 100 * UNIT);
            let Ok(shares) = self.state.bootstrap(bundle) else {
                panic!("bootstrap");
            };
            self.state.flush_events();
            self.sink.drain();
            shares
        }

        fn events(&mut self) -> Vec<PoolEvent> {
            self.state.flush_events();
            self.sink.drain()
        }

        fn settle(&mut self, bundle: TokenBundle) {
            let (v1, v2) = bundle.into_vaults();
            let _ = self.a.burn(v1);
            let _ = self.b.burn(v2);
        }
    }

    const UNIT: u128 = 100_000_000;

    #[test]
    fn bootstrap_mints_one_share() {
        let mut f = fixture();
        let shares = f.bootstrapped();
        assert_eq!(shares.balance(), Amount::ONE);
        assert_eq!(shares.kind(), f.state.share_kind());
        assert_eq!(f.state.total_supply(), Amount::ONE);
        assert_eq!(f.state.reserve1.balance(), Amount::from_units(100));
        assert_eq!(f.state.reserve2.balance(), Amount::from_units(100));
        let _ = f.state.shares.retire(shares);
    }

    #[test]
    fn bootstrap_events() {
        let mut f = fixture();
        let bundle = f.bundle(3 * UNIT, 4 * UNIT);
        let Ok(shares) = f.state.bootstrap(bundle) else {
            panic!("bootstrap");
        };
        assert_eq!(
            f.events(),
            vec![
                PoolEvent::TokensDeposited {
                    kind: f.a.kind(),
                    amount: Amount::from_units(3),
                },
                PoolEvent::TokensDeposited {
                    kind: f.b.kind(),
                    amount: Amount::from_units(4),
                },
                PoolEvent::SharesMinted { amount: Amount::ONE },
            ]
        );
        let _ = f.state.shares.retire(shares);
    }

    #[test]
    fn bootstrap_runs_once() {
        let mut f = fixture();
        let shares = f.bootstrapped();
        let again = f.bundle(UNIT, UNIT);
        let Err(rejected) = f.state.bootstrap(again) else {
            panic!("expected AlreadyInitialized");
        };
        assert_eq!(rejected.error(), &PairError::AlreadyInitialized);
        assert_eq!(f.state.total_supply(), Amount::ONE);
        f.settle(rejected.into_input());
        let _ = f.state.shares.retire(shares);
    }

    #[test]
    fn bootstrap_requires_both_sides() {
        let mut f = fixture();
        let one_sided = f.bundle(UNIT, 0);
        let Err(rejected) = f.state.bootstrap(one_sided) else {
            panic!("expected EmptyVault");
        };
        assert_eq!(rejected.error(), &PairError::EmptyVault);
        assert!(f.state.total_supply().is_zero());
        f.settle(rejected.into_input());
    }

    #[test]
    fn add_before_bootstrap_fails() {
        let mut f = fixture();
        let bundle = f.bundle(UNIT, UNIT);
        let Err(rejected) = f.state.add_liquidity(bundle) else {
            panic!("expected NotInitialized");
        };
        assert_eq!(rejected.error(), &PairError::NotInitialized);
        f.settle(rejected.into_input());
    }

    #[test]
    fn proportional_add_mints_ratio() {
        let mut f = fixture();
        let first = f.bootstrapped();
        let bundle = f.bundle(10 * UNIT, 10 * UNIT);
        let Ok(minted) = f.state.add_liquidity(bundle) else {
            panic!("add");
        };
        assert_eq!(minted.balance(), Amount::from_raw(10_000_000));
        assert_eq!(f.state.total_supply(), Amount::from_raw(110_000_000));
        assert_eq!(
            f.events().last(),
            Some(&PoolEvent::SharesMinted {
                amount: Amount::from_raw(10_000_000)
            })
        );
        let _ = f.state.shares.retire(minted);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn disproportionate_add_uses_smaller_side() {
        let mut f = fixture();
        let first = f.bootstrapped();
        // Reserves after a 10-unit swap at 0.30%.
        f.state.reserve1.absorb(AssetVault::with_balance(
            f.a.kind(),
            Amount::from_units(10),
        ));
        let _ = f.state.reserve2.take(Amount::from_raw(906_610_893)).into_balance();

        let skewed = f.bundle(11 * UNIT, 5 * UNIT);
        let Ok(skewed_shares) = f.state.add_liquidity(skewed) else {
            panic!("add");
        };
        assert_eq!(skewed_shares.balance(), Amount::from_raw(5_498_499));
        // The whole deposit is retained, excess included.
        assert_eq!(f.state.reserve1.balance(), Amount::from_units(121));

        let _ = f.state.shares.retire(skewed_shares);
        let _ = f.state.reserve1.take(Amount::from_units(11)).into_balance();
        let _ = f.state.reserve2.take(Amount::from_units(5)).into_balance();

        let matched = f.bundle(11 * UNIT, 909_338_910);
        let Ok(matched_shares) = f.state.add_liquidity(matched) else {
            panic!("add");
        };
        assert_eq!(matched_shares.balance(), Amount::from_raw(9_999_999));
        assert!(matched_shares.balance() > Amount::from_raw(5_498_499));
        let _ = f.state.shares.retire(matched_shares);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn add_rejects_empty_side_and_dust() {
        let mut f = fixture();
        let first = f.bootstrapped();
        let one_sided = f.bundle(UNIT, 0);
        let Err(rejected) = f.state.add_liquidity(one_sided) else {
            panic!("expected EmptyVault");
        };
        assert_eq!(rejected.error(), &PairError::EmptyVault);
        f.settle(rejected.into_input());

        let dust = f.bundle(1, 1);
        let Err(rejected) = f.state.add_liquidity(dust) else {
            panic!("expected LiquidityTooSmall");
        };
        assert_eq!(rejected.error(), &PairError::LiquidityTooSmall);
        assert_eq!(f.state.reserve1.balance(), Amount::from_units(100));
        f.settle(rejected.into_input());
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn add_rejects_foreign_bundle() {
        let mut f = fixture();
        let first = f.bootstrapped();
        let mut c = Issuer::new("C");
        let (Ok(v1), Ok(v3)) = (f.a.mint(Amount::ONE), c.mint(Amount::ONE)) else {
            panic!("mint");
        };
        let Ok(bundle) = TokenBundle::from_vaults(v1, v3) else {
            panic!("distinct kinds");
        };
        let Err(rejected) = f.state.add_liquidity(bundle) else {
            panic!("expected TypeMismatch");
        };
        assert_eq!(
            rejected.error(),
            &PairError::TypeMismatch {
                expected: f.b.kind(),
                found: c.kind(),
            }
        );
        let (v1, v3) = rejected.into_input().into_vaults();
        let _ = f.a.burn(v1);
        let _ = c.burn(v3);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn remove_half_pays_half() {
        let mut f = fixture();
        let mut first = f.bootstrapped();
        let Ok(half) = first.withdraw(Amount::from_raw(UNIT / 2)) else {
            panic!("split");
        };
        let Ok(bundle) = f.state.remove_liquidity(half) else {
            panic!("remove");
        };
        assert_eq!(bundle.token1_balance(), Amount::from_units(50));
        assert_eq!(bundle.token2_balance(), Amount::from_units(50));
        assert_eq!(f.state.total_supply(), Amount::from_raw(UNIT / 2));
        assert_eq!(
            f.events(),
            vec![
                PoolEvent::SharesBurned {
                    amount: Amount::from_raw(UNIT / 2)
                },
                PoolEvent::TokensWithdrawn {
                    kind: f.a.kind(),
                    amount: Amount::from_units(50),
                },
                PoolEvent::TokensWithdrawn {
                    kind: f.b.kind(),
                    amount: Amount::from_units(50),
                },
            ]
        );
        f.settle(bundle);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn remove_entire_supply_refused() {
        let mut f = fixture();
        let first = f.bootstrapped();
        let Err(rejected) = f.state.remove_liquidity(first) else {
            panic!("expected Precondition");
        };
        assert!(matches!(rejected.error(), PairError::Precondition(_)));
        assert!(rejected.error().is_precondition_violation());
        assert_eq!(f.state.total_supply(), Amount::ONE);
        let _ = f.state.shares.retire(rejected.into_input());
    }

    #[test]
    fn remove_all_but_epsilon_succeeds() {
        let mut f = fixture();
        let mut first = f.bootstrapped();
        let Ok(most) = first.withdraw(Amount::from_raw(UNIT - 1)) else {
            panic!("split");
        };
        let Ok(bundle) = f.state.remove_liquidity(most) else {
            panic!("remove");
        };
        assert_eq!(bundle.token1_balance(), Amount::from_raw(9_999_999_900));
        assert_eq!(f.state.reserve1.balance(), Amount::from_raw(100));
        assert_eq!(f.state.total_supply(), Amount::EPSILON);
        f.settle(bundle);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn remove_rejects_wrong_kind_and_empty() {
        let mut f = fixture();
        let first = f.bootstrapped();
        let Ok(not_shares) = f.a.mint(Amount::ONE) else {
            panic!("mint");
        };
        let Err(rejected) = f.state.remove_liquidity(not_shares) else {
            panic!("expected TypeMismatch");
        };
        assert!(matches!(rejected.error(), PairError::TypeMismatch { .. }));
        let _ = f.a.burn(rejected.into_input());

        let empty = f.state.shares.create_empty_vault();
        let Err(rejected) = f.state.remove_liquidity(empty) else {
            panic!("expected EmptyVault");
        };
        assert_eq!(rejected.error(), &PairError::EmptyVault);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn donate_grows_reserves_without_minting() {
        let mut f = fixture();
        let first = f.bootstrapped();
        let gift = f.bundle(5 * UNIT, 0);
        let Ok(()) = f.state.donate_liquidity(gift) else {
            panic!("donate");
        };
        assert_eq!(f.state.reserve1.balance(), Amount::from_units(105));
        assert_eq!(f.state.total_supply(), Amount::ONE);
        assert_eq!(
            f.events(),
            vec![PoolEvent::TokensDeposited {
                kind: f.a.kind(),
                amount: Amount::from_units(5),
            }]
        );

        let nothing = TokenBundle::new(f.state.pair);
        let Err(rejected) = f.state.donate_liquidity(nothing) else {
            panic!("expected EmptyVault");
        };
        assert_eq!(rejected.error(), &PairError::EmptyVault);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn add_then_remove_is_not_profitable() {
        let mut f = fixture();
        let first = f.bootstrapped();
        let bundle = f.bundle(37 * UNIT, 41 * UNIT);
        let Ok(minted) = f.state.add_liquidity(bundle) else {
            panic!("add");
        };
        let Ok(back) = f.state.remove_liquidity(minted) else {
            panic!("remove");
        };
        assert!(back.token1_balance() <= Amount::from_units(37));
        assert!(back.token2_balance() <= Amount::from_units(41));
        f.settle(back);
        let _ = f.state.shares.retire(first);
    }

    #[test]
    fn burn_shares_lowers_supply() {
        let mut f = fixture();
        let mut shares = f.bootstrapped();
        let bundle = f.bundle(10 * UNIT, 10 * UNIT);
        let Ok(minted) = f.state.add_liquidity(bundle) else {
            panic!("add");
        };
        let before = f.state.total_supply();
        let _ = f.events();
        let Ok(burned) = f.state.burn_shares(minted) else {
            panic!("burn");
        };
        assert_eq!(burned, Amount::from_raw(10_000_000));
        assert_eq!(before.checked_sub(&burned), Some(f.state.total_supply()));
        assert_eq!(shares.balance(), f.state.total_supply());
        assert_eq!(f.state.reserve1.balance(), Amount::from_raw(110 * UNIT));
        assert_eq!(f.events(), vec![PoolEvent::SharesBurned { amount: burned }]);

        // The last holder can always get rid of their shares.
        let Ok(last) = shares.withdraw(Amount::ONE) else {
            panic!("withdraw");
        };
        let Ok(_) = f.state.burn_shares(last) else {
            panic!("burn");
        };
        assert_eq!(f.state.total_supply(), Amount::ZERO);
        let Ok(empty) = f.state.burn_shares(shares) else {
            panic!("burn empty");
        };
        assert_eq!(empty, Amount::ZERO);
        assert_eq!(f.events(), vec![PoolEvent::SharesBurned { amount: Amount::ONE }]);
    }

    #[test]
    fn burn_shares_rejects_foreign_kind() {
        let mut f = fixture();
        let _shares = f.bootstrapped();
        let Ok(foreign) = f.a.mint(Amount::ONE) else {
            panic!("mint");
        };
        let Err(rejected) = f.state.burn_shares(foreign) else {
            panic!("expected TypeMismatch");
        };
        assert!(matches!(rejected.error(), PairError::TypeMismatch { .. }));
        assert_eq!(f.state.total_supply(), Amount::ONE);
        let _ = f.a.burn(rejected.into_input());
    }
}
