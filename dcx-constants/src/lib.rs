pub mod network_info;
pub mod sample;

pub use network_info::{
    is_supported_network, network_info_from_id, register_network, NetworkInfo,
};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[macro_use]
extern crate lazy_static;

/// Version of the connector contract implemented by this workspace.
/// DApps branch on this string rather than assuming compatibility.
pub const API_VERSION: &'static str = "1.0.0";

pub const MAINNET: &'static str = "mainnet";
pub const TESTNET: &'static str = "testnet";

/// Segment id reserved for the guaranteed section of a transaction.
/// Intents can never be placed there.
pub const GUARANTEED_SEGMENT_ID: u16 = 0;
/// Lowest fallible segment id. An intent placed here runs before any other
/// intent's actions if transactions are merged later.
pub const PRIORITY_SEGMENT_ID: u16 = 1;
pub const MAX_SEGMENT_ID: u16 = u16::MAX;

/// Domain-separation prefix prepended to every `signData` payload before
/// hashing, so those signatures cannot be replayed as any other message class.
pub const DATA_SIGNING_PREFIX: &'static str = "dcx:data-signature:v1:";
