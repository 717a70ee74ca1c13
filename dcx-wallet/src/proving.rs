//! Wallet-side proving delegate.
//!
//! Key material comes from the caller-owned provider; what gets computed
//! here stays wallet-side. The reference wallet does not run a real
//! circuit: a preimage is a JSON payload carrying its public outputs, a
//! proof is a deterministic digest over the key material and the preimage.
//! That is enough to exercise the delegation shape end to end.

use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigUint;
use serde::Deserialize;

use dcx_api::{ConnectorError, ConnectorResult, KeyMaterialProvider, ProvingProvider};

use crate::keys::sha256_tagged;

/// What the reference wallet expects a serialized preimage to decode to.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreimagePayload {
    /// Per-output results; `null` marks outputs the circuit leaves
    /// unconstrained.
    outputs: Vec<Option<String>>,
    #[serde(default)]
    binding_input: Option<String>,
}

impl PreimagePayload {
    fn parse(serialized_preimage: &[u8]) -> ConnectorResult<PreimagePayload> {
        serde_json::from_slice(serialized_preimage).map_err(|_| ConnectorError::InvalidPayload)
    }

    fn outputs(&self) -> ConnectorResult<Vec<Option<BigUint>>> {
        self.outputs
            .iter()
            .map(|output| match output {
                Some(decimal) => decimal
                    .parse::<BigUint>()
                    .map(Some)
                    .map_err(|_| ConnectorError::InvalidPayload),
                None => Ok(None),
            })
            .collect()
    }
}

pub struct WalletProver {
    key_material: Arc<dyn KeyMaterialProvider>,
}

impl WalletProver {
    pub fn new(key_material: Arc<dyn KeyMaterialProvider>) -> WalletProver {
        WalletProver { key_material }
    }
}

#[async_trait]
impl ProvingProvider for WalletProver {
    async fn check(
        &self,
        serialized_preimage: &[u8],
        key_location: &str,
    ) -> ConnectorResult<Vec<Option<BigUint>>> {
        // a check needs the verifier key only; the prover key stays unloaded
        let verifier_key = self.key_material.get_verifier_key(key_location).await?;
        dcx_api::dcx_ensure!(!verifier_key.is_empty(), ConnectorError::WalletFault);

        PreimagePayload::parse(serialized_preimage)?.outputs()
    }

    async fn prove(
        &self,
        serialized_preimage: &[u8],
        key_location: &str,
        overwrite_binding_input: Option<BigUint>,
    ) -> ConnectorResult<Vec<u8>> {
        let payload = PreimagePayload::parse(serialized_preimage)?;

        let zkir = self.key_material.get_zkir(key_location).await?;
        let prover_key = self.key_material.get_prover_key(key_location).await?;
        dcx_api::dcx_ensure!(
            !zkir.is_empty() && !prover_key.is_empty(),
            ConnectorError::WalletFault
        );

        let binding_input = match overwrite_binding_input {
            Some(overwrite) => Some(overwrite.to_str_radix(10)),
            None => payload.binding_input.clone(),
        };

        let mut transcript = Vec::new();
        transcript.extend_from_slice(&sha256_tagged("proof/zkir", &zkir));
        transcript.extend_from_slice(&sha256_tagged("proof/prover-key", &prover_key));
        transcript.extend_from_slice(&sha256_tagged("proof/preimage", serialized_preimage));
        if let Some(binding_input) = binding_input {
            transcript.extend_from_slice(&sha256_tagged(
                "proof/binding-input",
                binding_input.as_bytes(),
            ));
        }
        Ok(sha256_tagged("proof", &transcript).to_vec())
    }
}
