use std::sync::Arc;

use dcx::api::{WalletConnector, WalletSession};
use dcx::{install_wallet, ConsentPolicy, Wallet, WalletConfig};
use dcx_common::FromHex;
use dcx_constants::network_info_from_id;
use dcx_constants::sample::{
    NIGHT_TOKEN_TYPE, SAMPLE_SHIELDED_TOKEN_TYPE, SAMPLE_UNSHIELDED_TOKEN_TYPE, TEST_RDNS,
    TEST_SEED, TEST_WALLET_ICON, TEST_WALLET_NAME,
};
use dcx_wallet::address::encode_address;

pub fn test_config() -> WalletConfig {
    WalletConfig {
        rdns: TEST_RDNS.to_string(),
        name: TEST_WALLET_NAME.to_string(),
        icon: TEST_WALLET_ICON.to_string(),
        ..WalletConfig::default()
    }
}

/// A funded wallet announced into a clean registry.
pub fn setup_wallet() -> Wallet {
    setup_wallet_with(test_config())
}

pub fn setup_wallet_with(config: WalletConfig) -> Wallet {
    dcx::registry::reset();
    let seed = Vec::from_hex(TEST_SEED).unwrap();
    let wallet = install_wallet(&seed, config).expect("install test wallet");

    wallet.credit_unshielded(NIGHT_TOKEN_TYPE, 1_000_000);
    wallet.credit_unshielded(SAMPLE_UNSHIELDED_TOKEN_TYPE, 50_000);
    wallet.credit_shielded(SAMPLE_SHIELDED_TOKEN_TYPE, 75_000);
    wallet.set_dust(100_000, 1_000_000);
    wallet
}

pub fn deny_config(consent: ConsentPolicy) -> WalletConfig {
    WalletConfig {
        consent,
        ..test_config()
    }
}

pub async fn connect_mainnet(wallet: &Wallet) -> Arc<dyn WalletSession> {
    wallet.connect("mainnet").await.expect("connect to mainnet")
}

/// Mint an address for a recipient that is not this wallet.
pub fn counterparty_address(kind: dcx::api::TokenKind, network_id: &str) -> String {
    let network = network_info_from_id(network_id).unwrap();
    let hrp = match kind {
        dcx::api::TokenKind::Shielded => &network.shielded_address_hrp,
        dcx::api::TokenKind::Unshielded => &network.unshielded_address_hrp,
    };
    encode_address(hrp, &[0x42u8; 32]).unwrap()
}
