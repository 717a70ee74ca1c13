//! Transaction construction shapes.
//!
//! Construction stage is carried by distinct types instead of a naming
//! convention: a sealed transaction cannot be passed where an unsealed one
//! is required, and vice versa. The serialized form stays an opaque string;
//! the connector moves transactions between stages, it never inspects them.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::types::{amount, TokenType};

/// A transaction that carries proofs and the preimage data for cryptographic
/// binding, but no signatures yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnsealedTransaction {
    pub raw: String,
}

impl UnsealedTransaction {
    pub fn new(raw: impl Into<String>) -> Self {
        UnsealedTransaction { raw: raw.into() }
    }
}

/// A transaction with proofs and signatures, cryptographically bound.
/// The only stage `submitTransaction` accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SealedTransaction {
    pub raw: String,
}

impl SealedTransaction {
    pub fn new(raw: impl Into<String>) -> Self {
        SealedTransaction { raw: raw.into() }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Shielded,
    Unshielded,
}

/// A requested movement of value out of the wallet into a transaction or
/// intent. `recipient` must be a Bech32m address matching `kind` and the
/// network the session is bound to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DesiredOutput {
    pub kind: TokenKind,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(with = "amount")]
    pub value: BigUint,
    pub recipient: String,
}

/// A requested amount the wallet is to provide into an intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DesiredInput {
    pub kind: TokenKind,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(with = "amount")]
    pub value: BigUint,
}

/// Segment id selection for a freshly constructed intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentId {
    /// A specific segment id within ledger limits. Use `1` to guarantee the
    /// intent's actions run before any other intent's actions should
    /// transactions be merged later.
    Explicit(u16),
    /// Let the wallet pick one at random, e.g. when setting up a swap and
    /// the DApp does not need a predictable id.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakeIntentOptions {
    pub intent_id: IntentId,
    /// Whether the wallet assumes this call's fee burden.
    pub pay_fees: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_output_wire_shape() {
        let output = DesiredOutput {
            kind: TokenKind::Unshielded,
            token_type: "00".repeat(32),
            value: BigUint::from(100u32),
            recipient: "mn_addr1qqqq".to_string(),
        };
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.starts_with(r#"{"kind":"unshielded","type":"0000"#));
        assert!(json.contains(r#""value":"100""#));

        let back: DesiredOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
    }

    #[test]
    fn test_stage_types_are_distinct() {
        // Same raw payload, different capability sets.
        let unsealed = UnsealedTransaction::new("cafe");
        let sealed = SealedTransaction::new("cafe");
        assert_eq!(unsealed.raw, sealed.raw);
    }
}
