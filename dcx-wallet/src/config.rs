use serde::{Deserialize, Serialize};

use dcx_api::Configuration;
use dcx_constants::{NetworkInfo, MAINNET, TESTNET};

use crate::consent::ConsentPolicy;

/// Static wallet setup: identity shown to DApps, served networks, consent
/// policy, and optional service overrides. Absent overrides fall back to
/// the per-network defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    pub rdns: String,
    pub name: String,
    pub icon: String,
    #[serde(default = "default_networks")]
    pub supported_networks: Vec<String>,
    #[serde(default)]
    pub consent: ConsentPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer_ws_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate_node_uri: Option<String>,
}

fn default_networks() -> Vec<String> {
    vec![MAINNET.to_string(), TESTNET.to_string()]
}

impl Default for WalletConfig {
    fn default() -> Self {
        WalletConfig {
            rdns: "io.dcx.wallet".to_string(),
            name: "DCX Reference Wallet".to_string(),
            icon: "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciLz4="
                .to_string(),
            supported_networks: default_networks(),
            consent: ConsentPolicy::default(),
            indexer_uri: None,
            indexer_ws_uri: None,
            substrate_node_uri: None,
        }
    }
}

impl WalletConfig {
    pub fn supports_network(&self, network_id: &str) -> bool {
        self.supported_networks.iter().any(|x| x == network_id)
    }

    /// The configuration surface reported to DApps for one network.
    pub fn configuration(&self, network: &NetworkInfo) -> Configuration {
        Configuration {
            indexer_uri: self
                .indexer_uri
                .clone()
                .unwrap_or_else(|| network.indexer_uri.clone()),
            indexer_ws_uri: self
                .indexer_ws_uri
                .clone()
                .unwrap_or_else(|| network.indexer_ws_uri.clone()),
            // kept for older DApps; proving is delegated nowadays
            prover_server_uri: None,
            substrate_node_uri: self
                .substrate_node_uri
                .clone()
                .unwrap_or_else(|| network.substrate_node_uri.clone()),
            network_id: network.network_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcx_constants::network_info_from_id;

    #[test]
    fn test_configuration_prefers_overrides() {
        let network = network_info_from_id("mainnet").unwrap();

        let config = WalletConfig::default();
        let reported = config.configuration(&network);
        assert_eq!(reported.indexer_uri, network.indexer_uri);
        assert_eq!(reported.network_id, "mainnet");
        assert_eq!(reported.prover_server_uri, None);

        let config = WalletConfig {
            indexer_uri: Some("https://indexer.local/api".to_string()),
            ..WalletConfig::default()
        };
        assert_eq!(
            config.configuration(&network).indexer_uri,
            "https://indexer.local/api"
        );
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: WalletConfig = serde_json::from_str(
            r#"{"rdns":"com.example.wallet","name":"Example","icon":"data:,"}"#,
        )
        .unwrap();
        assert!(config.supports_network("mainnet"));
        assert!(config.supports_network("testnet"));
        assert!(!config.supports_network("devnet-unknown"));
        assert_eq!(config.consent, ConsentPolicy::AllowAll);
    }
}
