//! Reference wallet for the DApp connector contract.
//!
//! An in-memory wallet implementing every session operation end to end:
//! key material and Bech32m addresses, a ledger snapshot with balances,
//! Dust and history, transaction construction and balancing, data signing
//! with domain separation, and proving delegation. It backs the
//! conformance suite and doubles as an executable model of what a real
//! wallet owes the contract; nothing here talks to a real chain.

pub mod address;
mod config;
mod consent;
mod envelope;
mod keys;
mod ledger;
mod proving;
mod session;
mod wallet;

pub use config::WalletConfig;
pub use consent::ConsentPolicy;
pub use envelope::{Intent, Seal, TxEnvelope};
pub use keys::WalletKeys;
pub use ledger::INTENT_FEE_DUST;
pub use proving::WalletProver;
pub use wallet::Wallet;

use core::result;

pub type Result<T> = result::Result<T, anyhow::Error>;
