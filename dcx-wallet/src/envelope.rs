//! Wallet-internal transaction representation.
//!
//! At the boundary a transaction is an opaque string; this is what the
//! reference wallet keeps inside it: a list of intents plus, once sealed,
//! a signature over their binding commitments. Hex-encoded JSON on the
//! wire, so fixtures stay readable when decoded.

use std::collections::HashMap;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use dcx_api::{
    ConnectorError, ConnectorResult, DesiredInput, DesiredOutput, TokenKind, TokenType,
};
use dcx_common::{FromHex, ToHex};

use crate::keys::{sha256, sha256_tagged, WalletKeys};

/// Per-token value totals keyed by kind and token type.
pub type Imbalance = HashMap<(TokenKind, TokenType), BigUint>;

fn net_imbalance<'a>(
    inputs: impl Iterator<Item = &'a DesiredInput>,
    outputs: impl Iterator<Item = &'a DesiredOutput>,
) -> (Imbalance, Imbalance) {
    let mut provided: Imbalance = HashMap::new();
    let mut requested: Imbalance = HashMap::new();
    for input in inputs {
        *provided
            .entry((input.kind, input.token_type.clone()))
            .or_default() += &input.value;
    }
    for output in outputs {
        *requested
            .entry((output.kind, output.token_type.clone()))
            .or_default() += &output.value;
    }

    let mut deficits = HashMap::new();
    for (key, want) in &requested {
        let have = provided.get(key).cloned().unwrap_or_default();
        if *want > have {
            deficits.insert(key.clone(), want.clone() - have);
        }
    }
    let mut surpluses = HashMap::new();
    for (key, have) in &provided {
        let want = requested.get(key).cloned().unwrap_or_default();
        if *have > want {
            surpluses.insert(key.clone(), have.clone() - want);
        }
    }
    (deficits, surpluses)
}

/// One party's side of the transaction: what it provides, what it expects,
/// and where it runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub segment_id: u16,
    pub inputs: Vec<DesiredInput>,
    pub outputs: Vec<DesiredOutput>,
    /// A fallible-section intent; its actions may roll back on chain.
    pub fallible: bool,
    /// Whether some party has assumed this intent's fee burden.
    pub fees_paid: bool,
    /// Hex proof blob covering this intent's actions.
    pub proof: String,
    /// Hex commitment cryptographically binding this intent, set at sealing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_commitment: Option<String>,
}

impl Intent {
    pub fn new(
        segment_id: u16,
        inputs: Vec<DesiredInput>,
        outputs: Vec<DesiredOutput>,
        fallible: bool,
    ) -> Intent {
        Intent {
            segment_id,
            inputs,
            outputs,
            fallible,
            fees_paid: false,
            proof: String::new(),
            binding_commitment: None,
        }
    }

    /// Canonical serialization the proof and binding digests are computed
    /// over: the intent with its commitment cleared, plus the network id.
    fn canonical_bytes(&self, network_id: &str) -> ConnectorResult<Vec<u8>> {
        let mut preimage = self.clone();
        preimage.binding_commitment = None;
        let mut bytes = serde_json::to_vec(&preimage).map_err(|_| ConnectorError::WalletFault)?;
        bytes.extend_from_slice(network_id.as_bytes());
        Ok(bytes)
    }

    /// Recompute the proof blob over the intent's current contents. Must be
    /// called again after any mutation; identical contents yield identical
    /// proofs.
    pub fn attach_proof(&mut self, network_id: &str) -> ConnectorResult<()> {
        self.proof.clear();
        let bytes = self.canonical_bytes(network_id)?;
        self.proof = sha256_tagged("intent/proof", &bytes).to_hex();
        Ok(())
    }

    /// Per-token value this intent still needs (`deficits`) and value it
    /// provides beyond its outputs (`surpluses`).
    pub fn imbalance(&self) -> (Imbalance, Imbalance) {
        net_imbalance(self.inputs.iter(), self.outputs.iter())
    }

    /// Commitment over the intent's contents and the network it targets.
    pub fn binding_digest(&self, network_id: &str) -> ConnectorResult<[u8; 32]> {
        let bytes = self.canonical_bytes(network_id)?;
        Ok(sha256_tagged("intent/binding", &bytes))
    }
}

/// Signature a wallet puts over every intent commitment when sealing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seal {
    pub commitment: String,
    pub signature: String,
    pub verifying_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TxEnvelope {
    pub network_id: String,
    pub intents: Vec<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal: Option<Seal>,
}

impl TxEnvelope {
    pub fn unsealed(network_id: impl Into<String>, intents: Vec<Intent>) -> Self {
        TxEnvelope {
            network_id: network_id.into(),
            intents,
            seal: None,
        }
    }

    pub fn parse(raw: &str) -> ConnectorResult<TxEnvelope> {
        let bytes = Vec::from_hex(raw).map_err(|_| ConnectorError::InvalidTransaction)?;
        serde_json::from_slice(&bytes).map_err(|_| ConnectorError::InvalidTransaction)
    }

    pub fn to_raw(&self) -> ConnectorResult<String> {
        let bytes = serde_json::to_vec(self).map_err(|_| ConnectorError::WalletFault)?;
        Ok(bytes.to_hex())
    }

    pub fn is_sealed(&self) -> bool {
        self.seal.is_some() && self.intents.iter().all(|x| x.binding_commitment.is_some())
    }

    pub fn expect_unsealed(&self) -> ConnectorResult<()> {
        dcx_api::dcx_ensure!(self.seal.is_none(), ConnectorError::InvalidTransaction);
        Ok(())
    }

    pub fn expect_sealed(&self) -> ConnectorResult<()> {
        dcx_api::dcx_ensure!(self.is_sealed(), ConnectorError::InvalidTransaction);
        Ok(())
    }

    pub fn has_fallible_intent(&self) -> bool {
        self.intents.iter().any(|x| x.fallible)
    }

    /// Transaction-wide imbalance, netted across intents: one intent's
    /// surplus covers another's deficit before the wallet is asked to.
    pub fn imbalance(&self) -> (Imbalance, Imbalance) {
        net_imbalance(
            self.intents.iter().flat_map(|x| x.inputs.iter()),
            self.intents.iter().flat_map(|x| x.outputs.iter()),
        )
    }

    pub fn deficits(&self) -> Imbalance {
        self.imbalance().0
    }

    /// No output is left uncovered. A surplus of inputs is still balanced;
    /// the excess is the submitter's problem, not a shape defect.
    pub fn is_balanced(&self) -> bool {
        self.deficits().is_empty()
    }

    /// Compute missing binding commitments and sign the lot. Commitments
    /// already present are left untouched, so resealing after appending an
    /// intent preserves the earlier intents' binding byte for byte.
    pub fn seal(&mut self, keys: &WalletKeys) -> ConnectorResult<()> {
        let network_id = self.network_id.clone();
        for intent in &mut self.intents {
            if intent.binding_commitment.is_none() {
                let digest = intent.binding_digest(&network_id)?;
                intent.binding_commitment = Some(digest.to_hex());
            }
        }

        let mut commitments = Vec::new();
        for intent in &self.intents {
            let commitment = intent
                .binding_commitment
                .as_ref()
                .ok_or(ConnectorError::WalletFault)?;
            commitments.extend_from_slice(commitment.as_bytes());
        }
        let commitment = sha256(&commitments);
        let signature = keys.sign_digest(&commitment);

        self.seal = Some(Seal {
            commitment: commitment.to_hex(),
            signature: signature.to_hex(),
            verifying_key: keys.unshielded_public_key().serialize().to_hex(),
        });
        Ok(())
    }
}
