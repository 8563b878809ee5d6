//! Pair AMM lifecycle example.
//!
//! Creates a USD/EUR pair, bootstraps it, trades in both directions,
//! provides and withdraws liquidity, and hands out a revocable swap proxy.
//!
//! # Run
//!
//! ```bash
//! cargo run --example pair_lifecycle
//! ```

use pair_amm::config::PoolConfig;
use pair_amm::custody::Issuer;
use pair_amm::domain::{Amount, AssetPair, FeeRate, SwapDirection};
use pair_amm::events::RecordingSink;
use pair_amm::pool::PairPool;
use pair_amm::traits::SwapPair;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Constant Product Pair (x · y = k) ===\n");

    // ── 1. Issue two asset kinds ────────────────────────────────────────
    let mut usd = Issuer::new("USD");
    let mut eur = Issuer::new("EUR");
    let pair = AssetPair::new(usd.kind(), eur.kind())?;
    println!("Pair: {pair}");

    // ── 2. Create a frozen pool with a 0.30% fee ────────────────────────
    let config =
        PoolConfig::new(pair, FeeRate::from_basis_points(30)).with_share_symbol("USD-EUR");
    let sink = RecordingSink::new();
    let (pool, admin) = PairPool::new(config, sink.clone())?;
    println!("Fee:    {}", pool.fee_percentage());
    println!("Frozen: {}", pool.is_frozen());

    // ── 3. Bootstrap 100 USD / 100 EUR and open for trading ─────────────
    let seed = pool.create_token_bundle(
        usd.mint(Amount::from_units(100))?,
        eur.mint(Amount::from_units(100))?,
    )?;
    let mut shares = admin.bootstrap(seed)?;
    admin.unfreeze();
    println!("\nBootstrapped, LP shares: {}", shares.balance());

    // ── 4. Quote and execute a swap: sell 10 USD ────────────────────────
    let curve = pool.quote_swap_exact_in(SwapDirection::Token1ToToken2, Amount::from_units(10))?;
    let quote =
        pool.quote_swap_exact_in_net(SwapDirection::Token1ToToken2, Amount::from_units(10))?;
    let euros = pool.swap(usd.mint(Amount::from_units(10))?)?;
    let amounts = pool.get_pool_amounts();
    println!("\n--- Swap: sell 10 USD ---");
    println!("  Curve:     {curve}");
    println!("  Quoted:    {quote} (after fee)");
    println!("  Received:  {} EUR", euros.balance());
    println!("  Reserves:  {} USD / {} EUR", amounts.token1, amounts.token2);

    // ── 5. Exact-out quote for the reverse direction ────────────────────
    let needed =
        pool.quote_swap_exact_out_gross(SwapDirection::Token2ToToken1, Amount::from_units(5))?;
    println!("\nEUR needed for 5 USD: {needed}");

    // ── 6. Add and remove liquidity ─────────────────────────────────────
    let deposit = pool.create_token_bundle(
        usd.mint(Amount::from_units(11))?,
        eur.mint(Amount::from_units(9))?,
    )?;
    let minted = pool.add_liquidity(deposit)?;
    println!("\n--- Add Liquidity: 11 USD + 9 EUR ---");
    println!("  LP minted:  {}", minted.balance());
    println!("  LP supply:  {}", pool.total_supply());

    let returned = pool.remove_liquidity(minted)?;
    println!("\n--- Remove Liquidity ---");
    println!("  USD back:   {}", returned.token1_balance());
    println!("  EUR back:   {}", returned.token2_balance());

    // ── 7. Delegate trading through a proxy, then revoke it ─────────────
    let proxy = admin.create_swap_proxy();
    let dollars = proxy.swap(euros)?;
    println!("\nProxy swap returned {} USD", dollars.balance());
    admin.revoke_swap_proxies();
    match proxy.swap(dollars) {
        Ok(_) => println!("unexpected: revoked proxy traded"),
        Err(rejected) => {
            println!("Revoked proxy refused: {}", rejected.error());
            let _ = usd.burn(rejected.into_input())?;
        }
    }

    // ── 8. Settle balances and print the event log ──────────────────────
    let (usd_back, eur_back) = returned.into_vaults();
    let _ = usd.burn(usd_back)?;
    let _ = eur.burn(eur_back)?;
    let keep = shares.withdraw(Amount::EPSILON)?;
    let redeemed = pool.remove_liquidity(shares)?;
    println!(
        "\nRedeemed all but {} LP: {:?}",
        keep.balance(),
        pool.get_pool_amounts()
    );
    let (usd_back, eur_back) = redeemed.into_vaults();
    let _ = usd.burn(usd_back)?;
    let _ = eur.burn(eur_back)?;
    println!("Burned the last {} LP", pool.burn_shares(keep)?);

    println!("\n--- Events ---");
    for event in sink.events() {
        println!("  {}", serde_json::to_string(&event)?);
    }
    println!("\nSnapshot: {:?}", pool.snapshot());
    Ok(())
}
