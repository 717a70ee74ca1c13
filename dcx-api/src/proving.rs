//! Proving delegation.
//!
//! The DApp owns key material lookup; the wallet owns proof computation.
//! Both sides meet through these two capability objects, passed for the
//! duration of one delegation and not retained beyond it unless the wallet
//! explicitly caches.

use async_trait::async_trait;
use num_bigint::BigUint;

use crate::error::ConnectorResult;

/// Resolves prover and verifier keys, as well as the ZKIR representation of
/// a circuit, each keyed by an opaque circuit key location.
///
/// The three lookups are separate so keys can be cached independently and
/// the prover key stays out of memory when only a check is needed.
#[async_trait]
pub trait KeyMaterialProvider: Send + Sync {
    async fn get_zkir(&self, circuit_key_location: &str) -> ConnectorResult<Vec<u8>>;
    async fn get_prover_key(&self, circuit_key_location: &str) -> ConnectorResult<Vec<u8>>;
    async fn get_verifier_key(&self, circuit_key_location: &str) -> ConnectorResult<Vec<u8>>;
}

/// Proof computation handle returned by the wallet.
#[async_trait]
pub trait ProvingProvider: Send + Sync {
    /// Validate a serialized preimage against the circuit's keys, returning
    /// the per-output results; absent entries are outputs the circuit does
    /// not constrain.
    async fn check(
        &self,
        serialized_preimage: &[u8],
        key_location: &str,
    ) -> ConnectorResult<Vec<Option<BigUint>>>;

    /// Compute a proof for the serialized preimage. `overwrite_binding_input`
    /// substitutes the binding input before proving when set.
    async fn prove(
        &self,
        serialized_preimage: &[u8],
        key_location: &str,
        overwrite_binding_input: Option<BigUint>,
    ) -> ConnectorResult<Vec<u8>>;
}
