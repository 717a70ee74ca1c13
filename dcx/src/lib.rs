//! Facade over the DApp connector workspace.
//!
//! Re-exports the contract, the discovery registry and the reference
//! wallet, plus the one-call setup a host page performs at load time.
//! The conformance suite lives in this crate's `tests/` directory.

pub use dcx_api as api;
pub use dcx_registry as registry;
pub use dcx_wallet::{ConsentPolicy, Wallet, WalletConfig};

use core::result;

pub type Result<T> = result::Result<T, anyhow::Error>;

/// Build a wallet from its seed and configuration and publish it into the
/// discovery registry, the way an extension does during page load. Returns
/// the wallet handle so the host can keep driving its state.
pub fn install_wallet(seed: &[u8], config: WalletConfig) -> Result<Wallet> {
    let wallet = Wallet::new(seed, config)?;
    wallet.announce();
    Ok(wallet)
}
