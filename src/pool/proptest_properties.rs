//! Property-based tests using `proptest` for pair invariants.
//!
//! 1. **Product growth**: `reserve1 × reserve2` never decreases across
//!    swaps, and grows when the fee is nonzero.
//! 2. **Share conservation**: outstanding share vaults sum to the supply.
//! 3. **No free liquidity**: add then remove returns at most the deposit.
//! 4. **Exact-out consistency**: paying the fee-inclusive exact-out
//!    quote yields at least the requested output.
//! 5. **Swap reversibility**: A→B→A returns no more than the input.

use proptest::prelude::*;

use super::{PairPool, PoolAdmin};
use crate::config::PoolConfig;
use crate::custody::{AssetVault, Issuer};
use crate::domain::{Amount, AssetPair, FeeRate, SwapDirection};
use crate::events::RecordingSink;
use crate::math::invariant_product;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

struct Harness {
    pool: PairPool,
    admin: PoolAdmin,
    a: Issuer,
    b: Issuer,
    shares: AssetVault,
}

/// Unfrozen pool bootstrapped with raw reserves `r1`/`r2`.
fn make_pool(r1: u128, r2: u128, fee_bps: u32) -> Harness {
    let mut a = Issuer::new("A");
    let mut b = Issuer::new("B");
    let Ok(pair) = AssetPair::new(a.kind(), b.kind()) else {
        panic!("distinct kinds");
    };
    let config = PoolConfig::new(pair, FeeRate::from_basis_points(fee_bps)).with_start_frozen(false);
    let Ok((pool, admin)) = PairPool::new(config, RecordingSink::new()) else {
        panic!("valid config");
    };
    let (Ok(v1), Ok(v2)) = (a.mint(Amount::from_raw(r1)), b.mint(Amount::from_raw(r2))) else {
        panic!("mint");
    };
    let Ok(bundle) = pool.create_token_bundle(v1, v2) else {
        panic!("bundle");
    };
    let Ok(shares) = admin.bootstrap(bundle) else {
        panic!("bootstrap");
    };
    Harness {
        pool,
        admin,
        a,
        b,
        shares,
    }
}

fn product(pool: &PairPool) -> u128 {
    let amounts = pool.get_pool_amounts();
    let Some(k) = invariant_product(amounts.token1, amounts.token2) else {
        panic!("product overflow in test range");
    };
    k
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Raw reserves between 1 and 1 000 000 whole units.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    100_000_000u128..=100_000_000_000_000u128
}

/// Swap sizes as a fraction of the input reserve, in basis points.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=300u32
}

// ---------------------------------------------------------------------------
// Property 1: Product growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        fee in fee_strategy(),
        fractions in prop::collection::vec((fraction_strategy(), any::<bool>()), 1..8),
    ) {
        let mut h = make_pool(r1, r2, fee);
        for (fraction, forward) in fractions {
            let k_before = product(&h.pool);
            let amounts = h.pool.get_pool_amounts();
            let (issuer, reserve_in) = if forward {
                (&mut h.a, amounts.token1)
            } else {
                (&mut h.b, amounts.token2)
            };
            let size = (reserve_in.raw() * fraction / 10_000).max(1);
            let Ok(input) = issuer.mint(Amount::from_raw(size)) else {
                panic!("mint");
            };
            match h.pool.swap(input) {
                Ok(out) => {
                    let k_after = product(&h.pool);
                    prop_assert!(k_after >= k_before, "k decreased: {} < {}", k_after, k_before);
                    if fee > 0 {
                        prop_assert!(k_after > k_before, "fee swap left k unchanged");
                    }
                    let _ = out.into_balance();
                }
                Err(rejected) => {
                    prop_assert_eq!(product(&h.pool), k_before);
                    let _ = rejected.into_input().into_balance();
                }
            }
        }
        let _ = h.shares.into_balance();
    }
}

// ---------------------------------------------------------------------------
// Properties 2 and 3: Share conservation, no free liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_remove_conserves_shares_and_value(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        d1 in reserve_strategy(),
        d2 in reserve_strategy(),
    ) {
        let mut h = make_pool(r1, r2, 30);
        let (Ok(v1), Ok(v2)) = (h.a.mint(Amount::from_raw(d1)), h.b.mint(Amount::from_raw(d2))) else {
            panic!("mint");
        };
        let Ok(bundle) = h.pool.create_token_bundle(v1, v2) else {
            panic!("bundle");
        };
        let minted = match h.pool.add_liquidity(bundle) {
            Ok(minted) => minted,
            Err(rejected) => {
                let (v1, v2) = rejected.into_input().into_vaults();
                let _ = (v1.into_balance(), v2.into_balance());
                let _ = h.shares.into_balance();
                return Ok(());
            }
        };
        let outstanding = h.shares.balance().checked_add(&minted.balance());
        prop_assert_eq!(outstanding, Some(h.pool.total_supply()));

        match h.pool.remove_liquidity(minted) {
            Ok(back) => {
                prop_assert!(back.token1_balance().raw() <= d1);
                prop_assert!(back.token2_balance().raw() <= d2);
                prop_assert_eq!(h.shares.balance(), h.pool.total_supply());
                let (v1, v2) = back.into_vaults();
                let _ = (v1.into_balance(), v2.into_balance());
            }
            Err(rejected) => {
                let _ = rejected.into_input().into_balance();
            }
        }
        let _ = h.shares.into_balance();
    }
}

// ---------------------------------------------------------------------------
// Property 4: Exact-out consistency
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exact_out_quote_delivers(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        fee in fee_strategy(),
        fraction in fraction_strategy(),
    ) {
        let mut h = make_pool(r1, r2, fee);
        let target = Amount::from_raw((r2 * fraction / 10_000).max(1));
        let quoted = h.pool.quote_swap_exact_out_gross(SwapDirection::Token1ToToken2, target);
        let Ok(gross) = quoted else {
            panic!("target below reserve");
        };
        let Ok(input) = h.a.mint(gross) else {
            panic!("mint");
        };
        let Ok(out) = h.pool.swap_token1_for_token2(input) else {
            panic!("quoted swap must succeed");
        };
        prop_assert!(out.balance() >= target);
        let _ = out.into_balance();
        let _ = h.shares.into_balance();
    }
}

// ---------------------------------------------------------------------------
// Property 5: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_never_profits(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let mut h = make_pool(r1, r2, 30);
        let size = (r1 * fraction / 10_000).max(1);
        let Ok(input) = h.a.mint(Amount::from_raw(size)) else {
            panic!("mint");
        };
        let Ok(mid) = h.pool.swap(input) else {
            let _ = h.shares.into_balance();
            return Ok(());
        };
        match h.pool.swap(mid) {
            Ok(back) => {
                prop_assert!(back.balance().raw() <= size);
                let _ = back.into_balance();
            }
            Err(rejected) => {
                let _ = rejected.into_input().into_balance();
            }
        }
        h.admin.freeze();
        prop_assert!(h.pool.is_frozen());
        let _ = h.shares.into_balance();
    }
}
