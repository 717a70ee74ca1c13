use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use dcx_common::PayloadEncoding;

use crate::error::ConnectorError;

/// Raw token type of the underlying ledger, as an opaque hex string.
/// The connector never inspects its structure.
pub type TokenType = String;

/// Snapshot of holdings, token type to amount. Zero balances may be omitted.
pub type TokenBalances = HashMap<TokenType, BigUint>;

/// Serde helper keeping arbitrary-precision amounts as decimal strings on
/// the wire. Floating point never crosses the boundary.
pub mod amount {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let decimal = String::deserialize(deserializer)?;
        decimal.parse::<BigUint>().map_err(de::Error::custom)
    }
}

/// Dust is generated over time from held Night, up to `cap`.
/// `balance <= cap` is the expected steady state; the contract reports, it
/// does not enforce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DustBalance {
    #[serde(with = "amount")]
    pub balance: BigUint,
    #[serde(with = "amount")]
    pub cap: BigUint,
}

/// Shielded identity material, all Bech32m. The two public keys are
/// returned alongside the address so building a shielded payment needs no
/// extra round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShieldedAddresses {
    pub shielded_address: String,
    pub shielded_coin_public_key: String,
    pub shielded_encryption_public_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnshieldedAddress {
    pub unshielded_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DustAddress {
    pub dust_address: String,
}

/// Service endpoints the wallet currently uses. DApps should prefer these
/// over their own defaults; the user may have picked them for privacy or
/// performance reasons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub indexer_uri: String,
    pub indexer_ws_uri: String,
    /// Deprecated in favor of proving delegation; rarely present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prover_server_uri: Option<String>,
    pub substrate_node_uri: String,
    /// Present so a DApp can validate it is connected where it wanted to be.
    pub network_id: String,
}

/// Which wallet key signs a `signData` payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Unshielded,
}

impl FromStr for KeyType {
    type Err = ConnectorError;

    fn from_str(input: &str) -> std::result::Result<KeyType, Self::Err> {
        match input {
            "unshielded" => Ok(KeyType::Unshielded),
            _ => Err(ConnectorError::InvalidPayload),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Unshielded => write!(f, "unshielded"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignDataOptions {
    pub encoding: PayloadEncoding,
    pub key_type: KeyType,
}

/// A signature together with the payload it covers and the verifying key
/// that binds it, so a third party can check it later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// The data signed, echoed back verbatim.
    pub data: String,
    pub signature: String,
    pub verifying_key: String,
}
