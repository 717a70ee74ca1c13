use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of one executed segment of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SegmentStatus {
    Success,
    Failure,
}

/// Per-segment execution outcomes, keyed by segment id.
pub type ExecutionStatus = BTreeMap<u16, SegmentStatus>;

/// Lifecycle of a transaction as far as the wallet can see it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TxStatus {
    /// Included in chain and finalized.
    #[serde(rename_all = "camelCase")]
    Finalized { execution_status: ExecutionStatus },
    /// Included in chain, not finalized yet.
    #[serde(rename_all = "camelCase")]
    Confirmed { execution_status: ExecutionStatus },
    /// Sent to the network, neither confirmed nor discarded yet.
    Pending,
    /// Failed to be included, e.g. TTL ran out or a validity check failed.
    Discarded,
}

/// Minimal record that a transaction is relevant to the wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Hex-encoded transaction hash.
    pub tx_hash: String,
    pub tx_status: TxStatus,
}
