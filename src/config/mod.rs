//! Declarative pool blueprints.
//!
//! A [`PoolConfig`] names the traded pair and the initial values of the
//! admin-mutable settings.  Configs are plain data: they can be built in
//! code or deserialized with `serde`, and are checked by
//! [`PoolConfig::validate`] when a pool is created from them.

mod pool_config;

pub use pool_config::PoolConfig;
