//! # Pair AMM
//!
//! A two-asset constant-product automated market maker with move-only
//! asset custody.
//!
//! The pool holds reserves of two distinct asset kinds, prices swaps on
//! the `x · y = k` curve net of a trading fee, and issues liquidity shares
//! proportional to each provider's contribution.  Assets are modelled as
//! linear values: an [`AssetVault`](custody::AssetVault) can be split and
//! merged but never copied, and every pool operation either hands back
//! the counter-assets or returns the caller's input untouched.
//!
//! # Quick Start
//!
//! ```rust
//! use pair_amm::config::PoolConfig;
//! use pair_amm::custody::Issuer;
//! use pair_amm::domain::{Amount, AssetPair, FeeRate};
//! use pair_amm::pool::PairPool;
//!
//! // 1. Two asset kinds, each with its own issuer
//! let mut usd = Issuer::new("USD");
//! let mut eur = Issuer::new("EUR");
//! let pair = AssetPair::new(usd.kind(), eur.kind()).expect("distinct kinds");
//!
//! // 2. A frozen pool with a 0.30% fee, and its admin
//! let config = PoolConfig::new(pair, FeeRate::from_basis_points(30));
//! let (pool, admin) = PairPool::with_tracing(config).expect("valid config");
//!
//! // 3. Seed 100/100 and open for trading
//! let seed = pool
//!     .create_token_bundle(
//!         usd.mint(Amount::from_units(100)).expect("mint"),
//!         eur.mint(Amount::from_units(100)).expect("mint"),
//!     )
//!     .expect("pair kinds");
//! let shares = admin.bootstrap(seed).expect("bootstrap");
//! assert_eq!(shares.balance(), Amount::ONE);
//! admin.unfreeze();
//!
//! // 4. Sell 10 USD
//! let euros = pool
//!     .swap(usd.mint(Amount::from_units(10)).expect("mint"))
//!     .expect("swap");
//! assert_eq!(euros.balance().to_string(), "9.06610893");
//! assert_eq!(pool.get_pool_amounts().token1, Amount::from_units(110));
//! # eur.burn(euros).expect("burn");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐       ┌──────────────┐
//! │  PoolAdmin   │       │  SwapProxy   │  SwapPair only, revocable
//! └──────┬───────┘       └──────┬───────┘
//!        │ privileged ops       │
//!        ▼                      ▼
//! ┌─────────────────────────────────────┐
//! │   PairPool  (Arc<Mutex<PoolState>>) │  swap / liquidity / queries
//! └──────────────────┬──────────────────┘
//!                    │ plan, then commit
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │  Custody: AssetVault, TokenBundle,  │
//! │           Issuer (share mint)       │
//! └──────────────────┬──────────────────┘
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │  Domain: Amount, FeeRate, AssetKind │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`FeeRate`](domain::FeeRate), [`AssetPair`](domain::AssetPair), etc. |
//! | [`custody`] | Move-only assets: [`AssetVault`](custody::AssetVault), [`TokenBundle`](custody::TokenBundle), [`Issuer`](custody::Issuer) |
//! | [`pool`] | [`PairPool`](pool::PairPool), [`PoolAdmin`](pool::PoolAdmin), [`SwapProxy`](pool::SwapProxy) and the curve formulas |
//! | [`traits`] | [`SwapPair`](traits::SwapPair), the delegable trading surface |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) blueprint |
//! | [`events`] | [`PoolEvent`](events::PoolEvent) and [`EventSink`](events::EventSink) implementations |
//! | [`math`] | Checked arithmetic and curve helpers |
//! | [`error`] | [`PairError`](error::PairError) and [`Rejected`](error::Rejected) |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate logs through [`tracing`] and never installs a subscriber.
//! Lifecycle and admin actions are `info`, per-operation detail is
//! `debug`, and a vault dropped while still holding a balance is
//! reported at `error`.

pub mod config;
pub mod custody;
pub mod domain;
pub mod error;
pub mod events;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;
