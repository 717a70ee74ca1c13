use anyhow::format_err;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::{MAINNET, TESTNET};

/// Per-network parameters a wallet needs to encode addresses and to report
/// its configured services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub network_id: String,
    pub shielded_address_hrp: String,
    pub shielded_coin_key_hrp: String,
    pub shielded_enc_key_hrp: String,
    pub unshielded_address_hrp: String,
    pub dust_address_hrp: String,
    pub indexer_uri: String,
    pub indexer_ws_uri: String,
    pub substrate_node_uri: String,
}

lazy_static! {
    static ref NETWORK_INFOS: RwLock<Vec<NetworkInfo>> = {
        let network_infos = vec![
            NetworkInfo {
                network_id: MAINNET.to_string(),
                shielded_address_hrp: "mn_shield-addr".to_string(),
                shielded_coin_key_hrp: "mn_shield-cpk".to_string(),
                shielded_enc_key_hrp: "mn_shield-epk".to_string(),
                unshielded_address_hrp: "mn_addr".to_string(),
                dust_address_hrp: "mn_dust".to_string(),
                indexer_uri: "https://indexer.midnight.network/api/v1/graphql".to_string(),
                indexer_ws_uri: "wss://indexer.midnight.network/api/v1/graphql/ws".to_string(),
                substrate_node_uri: "wss://rpc.midnight.network".to_string(),
            },
            NetworkInfo {
                network_id: TESTNET.to_string(),
                shielded_address_hrp: "mn_shield-addr_test".to_string(),
                shielded_coin_key_hrp: "mn_shield-cpk_test".to_string(),
                shielded_enc_key_hrp: "mn_shield-epk_test".to_string(),
                unshielded_address_hrp: "mn_addr_test".to_string(),
                dust_address_hrp: "mn_dust_test".to_string(),
                indexer_uri: "https://indexer.testnet.midnight.network/api/v1/graphql"
                    .to_string(),
                indexer_ws_uri: "wss://indexer.testnet.midnight.network/api/v1/graphql/ws"
                    .to_string(),
                substrate_node_uri: "wss://rpc.testnet.midnight.network".to_string(),
            },
        ];
        RwLock::new(network_infos)
    };
}

pub fn network_info_from_id(network_id: &str) -> Result<NetworkInfo> {
    let network_infos = NETWORK_INFOS.read();
    network_infos
        .iter()
        .find(|x| x.network_id == network_id)
        .cloned()
        .ok_or_else(|| format_err!("unsupported_network"))
}

pub fn is_supported_network(network_id: &str) -> bool {
    let network_infos = NETWORK_INFOS.read();
    network_infos.iter().any(|x| x.network_id == network_id)
}

/// Register an additional network, e.g. a local devnet. Entries are
/// append-only; a duplicate id shadows nothing because lookup returns the
/// first match.
pub fn register_network(network_info: NetworkInfo) {
    let mut network_infos = NETWORK_INFOS.write();
    network_infos.push(network_info);
}
