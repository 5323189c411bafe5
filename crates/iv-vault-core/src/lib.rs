//! Application core of the Infinity Vault staking front end.
//!
//! Everything here is free of DOM and browser types so the flows can be
//! driven from the wasm crate and from native tests alike.

pub mod assets;
pub mod calculator;
pub mod config;
pub mod error;
pub mod ledger;
pub mod prices;
pub mod selector;
pub mod session;
pub mod vault;

pub use config::VaultConfig;
pub use error::VaultError;
pub use vault::{ConnectState, TxKind, Vault};
