use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigUint;
use parking_lot::RwLock;
use rand::Rng;

use dcx_api::{
    Configuration, ConnectionStatus, ConnectorError, ConnectorResult, DesiredInput, DesiredOutput,
    DustAddress, DustBalance, HistoryEntry, IntentId, KeyMaterialProvider, MakeIntentOptions,
    ProvingProvider, SealedTransaction, SessionMethod, ShieldedAddresses, SignDataOptions,
    Signature, TokenBalances, TokenKind, UnsealedTransaction, UnshieldedAddress, WalletSession,
};
use dcx_common::{decode_payload, FromHex, ToHex};
use dcx_constants::{NetworkInfo, DATA_SIGNING_PREFIX, GUARANTEED_SEGMENT_ID};

use crate::address;
use crate::envelope::{Imbalance, Intent, TxEnvelope};
use crate::keys::sha256_tagged;
use crate::ledger::INTENT_FEE_DUST;
use crate::proving::WalletProver;
use crate::wallet::WalletInner;

/// One established connection, scoped to one network for its lifetime.
pub(crate) struct SessionHandle {
    wallet: Arc<WalletInner>,
    network: NetworkInfo,
    session_id: String,
    live: Arc<AtomicBool>,
    hinted: RwLock<Vec<SessionMethod>>,
}

impl SessionHandle {
    pub(crate) fn new(
        wallet: Arc<WalletInner>,
        network: NetworkInfo,
        session_id: String,
        live: Arc<AtomicBool>,
    ) -> SessionHandle {
        SessionHandle {
            wallet,
            network,
            session_id,
            live,
            hinted: RwLock::new(Vec::new()),
        }
    }

    fn ensure_live(&self) -> ConnectorResult<()> {
        dcx_api::dcx_ensure!(
            self.live.load(Ordering::SeqCst),
            ConnectorError::SessionDisconnected
        );
        Ok(())
    }

    /// Liveness first, then the consent policy. Hints never enter into
    /// this: an un-hinted method passes exactly like a hinted one.
    fn guard(&self, method: SessionMethod) -> ConnectorResult<()> {
        self.ensure_live()?;
        self.wallet.config.consent.ensure_allowed(method)
    }

    fn ensure_session_network(&self, envelope: &TxEnvelope) -> ConnectorResult<()> {
        dcx_api::dcx_ensure!(
            envelope.network_id == self.network.network_id,
            ConnectorError::InvalidTransaction
        );
        Ok(())
    }

    fn change_address(&self, kind: TokenKind) -> ConnectorResult<String> {
        match kind {
            TokenKind::Shielded => {
                Ok(address::shielded_addresses(&self.wallet.keys, &self.network)?.shielded_address)
            }
            TokenKind::Unshielded => {
                Ok(address::unshielded_address(&self.wallet.keys, &self.network)?
                    .unshielded_address)
            }
        }
    }

    fn validate_outputs(&self, outputs: &[DesiredOutput]) -> ConnectorResult<()> {
        for output in outputs {
            address::validate_recipient(&output.recipient, output.kind, &self.network)?;
        }
        Ok(())
    }

    fn draws_from(deficits: &Imbalance) -> Vec<(TokenKind, String, BigUint)> {
        deficits
            .iter()
            .map(|((kind, token_type), value)| (*kind, token_type.clone(), value.clone()))
            .collect()
    }

    /// Fund every intent of an unsealed envelope from the wallet's own
    /// holdings: deficits become wallet inputs, surpluses come back as
    /// change outputs to the wallet, the flat fee is charged alongside.
    /// Checked against the ledger as one step before anything mutates.
    fn fund_intents(&self, envelope: &mut TxEnvelope) -> ConnectorResult<()> {
        let network_id = envelope.network_id.clone();
        let plans: Vec<(Imbalance, Imbalance)> =
            envelope.intents.iter().map(|x| x.imbalance()).collect();

        let mut draws = Vec::new();
        for (deficits, _) in &plans {
            draws.extend(Self::draws_from(deficits));
        }
        let fee = BigUint::from(INTENT_FEE_DUST);
        self.wallet.ledger.write().withdraw(&draws, Some(&fee))?;

        for (intent, (deficits, surpluses)) in envelope.intents.iter_mut().zip(plans) {
            for ((kind, token_type), value) in deficits {
                intent.inputs.push(DesiredInput {
                    kind,
                    token_type,
                    value,
                });
            }
            for ((kind, token_type), value) in surpluses {
                let recipient = self.change_address(kind)?;
                self.wallet.ledger.write().credit(kind, &token_type, &value);
                intent.outputs.push(DesiredOutput {
                    kind,
                    token_type,
                    value,
                    recipient,
                });
            }
            intent.fees_paid = true;
            intent.attach_proof(&network_id)?;
        }
        Ok(())
    }

    fn pick_free_segment(&self, envelope: &TxEnvelope) -> u16 {
        let mut rng = rand::thread_rng();
        loop {
            let segment_id: u16 = rng.gen_range(2..=u16::MAX);
            if !envelope.intents.iter().any(|x| x.segment_id == segment_id) {
                return segment_id;
            }
        }
    }

    fn seal_and_wrap(&self, mut envelope: TxEnvelope) -> ConnectorResult<SealedTransaction> {
        envelope.seal(&self.wallet.keys)?;
        Ok(SealedTransaction::new(envelope.to_raw()?))
    }
}

#[async_trait]
impl WalletSession for SessionHandle {
    async fn get_shielded_balances(&self) -> ConnectorResult<TokenBalances> {
        self.guard(SessionMethod::GetShieldedBalances)?;
        Ok(self.wallet.ledger.read().shielded_balances())
    }

    async fn get_unshielded_balances(&self) -> ConnectorResult<TokenBalances> {
        self.guard(SessionMethod::GetUnshieldedBalances)?;
        Ok(self.wallet.ledger.read().unshielded_balances())
    }

    async fn get_dust_balance(&self) -> ConnectorResult<DustBalance> {
        self.guard(SessionMethod::GetDustBalance)?;
        Ok(self.wallet.ledger.read().dust_balance())
    }

    async fn get_shielded_addresses(&self) -> ConnectorResult<ShieldedAddresses> {
        self.guard(SessionMethod::GetShieldedAddresses)?;
        address::shielded_addresses(&self.wallet.keys, &self.network)
    }

    async fn get_unshielded_address(&self) -> ConnectorResult<UnshieldedAddress> {
        self.guard(SessionMethod::GetUnshieldedAddress)?;
        address::unshielded_address(&self.wallet.keys, &self.network)
    }

    async fn get_dust_address(&self) -> ConnectorResult<DustAddress> {
        self.guard(SessionMethod::GetDustAddress)?;
        address::dust_address(&self.wallet.keys, &self.network)
    }

    async fn get_tx_history(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> ConnectorResult<Vec<HistoryEntry>> {
        self.guard(SessionMethod::GetTxHistory)?;
        Ok(self
            .wallet
            .ledger
            .read()
            .history_page(page_number, page_size))
    }

    async fn balance_unsealed_transaction(
        &self,
        tx: UnsealedTransaction,
    ) -> ConnectorResult<SealedTransaction> {
        self.guard(SessionMethod::BalanceUnsealedTransaction)?;
        let mut envelope = TxEnvelope::parse(&tx.raw)?;
        envelope.expect_unsealed()?;
        self.ensure_session_network(&envelope)?;
        dcx_api::dcx_ensure!(
            !envelope.intents.is_empty(),
            ConnectorError::InvalidTransaction
        );

        // nothing is bound yet, so imbalances are fixed inside the intents
        // that carry them, fallible ones included
        self.fund_intents(&mut envelope)?;

        log::debug!("session {} balanced unsealed transaction", self.session_id);
        self.seal_and_wrap(envelope)
    }

    async fn balance_sealed_transaction(
        &self,
        tx: SealedTransaction,
    ) -> ConnectorResult<SealedTransaction> {
        self.guard(SessionMethod::BalanceSealedTransaction)?;
        let mut envelope = TxEnvelope::parse(&tx.raw)?;
        envelope.expect_sealed()?;
        self.ensure_session_network(&envelope)?;

        let (deficits, surpluses) = envelope.imbalance();
        if deficits.is_empty() && surpluses.is_empty() {
            return Ok(tx);
        }
        // a fallible section cannot be rebalanced without touching its
        // binding; such transactions must be balanced before sealing
        dcx_api::dcx_ensure!(
            !envelope.has_fallible_intent(),
            ConnectorError::InvalidTransaction
        );

        let network_id = envelope.network_id.clone();
        let draws = Self::draws_from(&deficits);
        let fee = BigUint::from(INTENT_FEE_DUST);
        self.wallet.ledger.write().withdraw(&draws, Some(&fee))?;

        let mut balancing = Intent::new(self.pick_free_segment(&envelope), vec![], vec![], false);
        for ((kind, token_type), value) in deficits {
            balancing.inputs.push(DesiredInput {
                kind,
                token_type,
                value,
            });
        }
        for ((kind, token_type), value) in surpluses {
            let recipient = self.change_address(kind)?;
            self.wallet.ledger.write().credit(kind, &token_type, &value);
            balancing.outputs.push(DesiredOutput {
                kind,
                token_type,
                value,
                recipient,
            });
        }
        balancing.fees_paid = true;
        balancing.attach_proof(&network_id)?;
        envelope.intents.push(balancing);

        log::debug!(
            "session {} balanced sealed transaction in separate intent",
            self.session_id
        );
        // resealing recomputes the outer signature only; the existing
        // intents' binding commitments stay byte-identical
        self.seal_and_wrap(envelope)
    }

    async fn make_transfer(
        &self,
        desired_outputs: Vec<DesiredOutput>,
    ) -> ConnectorResult<SealedTransaction> {
        self.guard(SessionMethod::MakeTransfer)?;
        dcx_api::dcx_ensure!(
            !desired_outputs.is_empty(),
            ConnectorError::InvalidTransaction
        );
        self.validate_outputs(&desired_outputs)?;

        let intent = Intent::new(GUARANTEED_SEGMENT_ID, vec![], desired_outputs, false);
        let mut envelope = TxEnvelope::unsealed(self.network.network_id.clone(), vec![intent]);
        self.fund_intents(&mut envelope)?;
        self.seal_and_wrap(envelope)
    }

    async fn make_intent(
        &self,
        desired_inputs: Vec<DesiredInput>,
        desired_outputs: Vec<DesiredOutput>,
        options: MakeIntentOptions,
    ) -> ConnectorResult<SealedTransaction> {
        self.guard(SessionMethod::MakeIntent)?;
        dcx_api::dcx_ensure!(
            !(desired_inputs.is_empty() && desired_outputs.is_empty()),
            ConnectorError::InvalidTransaction
        );
        self.validate_outputs(&desired_outputs)?;

        let segment_id = match options.intent_id {
            IntentId::Explicit(segment_id) => {
                // 0 is the guaranteed section, never an intent slot
                dcx_api::dcx_ensure!(
                    segment_id != GUARANTEED_SEGMENT_ID,
                    ConnectorError::InvalidTransaction
                );
                segment_id
            }
            IntentId::Random => rand::thread_rng().gen_range(2..=u16::MAX),
        };

        // the desired inputs are the wallet's contribution; the outputs
        // stay uncovered until a counterparty balances the transaction
        let draws: Vec<_> = desired_inputs
            .iter()
            .map(|x| (x.kind, x.token_type.clone(), x.value.clone()))
            .collect();
        let fee = BigUint::from(INTENT_FEE_DUST);
        self.wallet
            .ledger
            .write()
            .withdraw(&draws, options.pay_fees.then_some(&fee))?;

        // a plain value intent; fallible sections only come from contract
        // calls, which DApps construct themselves
        let mut intent = Intent::new(segment_id, desired_inputs, desired_outputs, false);
        intent.fees_paid = options.pay_fees;
        intent.attach_proof(&self.network.network_id)?;

        let envelope = TxEnvelope::unsealed(self.network.network_id.clone(), vec![intent]);
        self.seal_and_wrap(envelope)
    }

    async fn sign_data(&self, data: &str, options: SignDataOptions) -> ConnectorResult<Signature> {
        self.guard(SessionMethod::SignData)?;
        let payload =
            decode_payload(data, options.encoding).map_err(|_| ConnectorError::InvalidPayload)?;

        let mut message = Vec::with_capacity(DATA_SIGNING_PREFIX.len() + payload.len());
        message.extend_from_slice(DATA_SIGNING_PREFIX.as_bytes());
        message.extend_from_slice(&payload);
        let digest = sha256_tagged("data-signature", &message);

        let keys = &self.wallet.keys;
        let signature = match options.key_type {
            dcx_api::KeyType::Unshielded => keys.sign_digest(&digest),
        };

        Ok(Signature {
            data: data.to_string(),
            signature: signature.to_hex(),
            verifying_key: keys.unshielded_public_key().serialize().to_hex(),
        })
    }

    async fn submit_transaction(&self, tx: SealedTransaction) -> ConnectorResult<()> {
        self.guard(SessionMethod::SubmitTransaction)?;
        let envelope = TxEnvelope::parse(&tx.raw)?;
        envelope.expect_sealed()?;
        self.ensure_session_network(&envelope)?;
        dcx_api::dcx_ensure!(envelope.is_balanced(), ConnectorError::InvalidTransaction);

        let bytes = Vec::from_hex(&tx.raw).map_err(|_| ConnectorError::InvalidTransaction)?;
        let tx_hash = sha256_tagged("tx-hash", &bytes).to_hex();
        self.wallet.ledger.write().record_pending(tx_hash.clone());

        // relay acceptance only; finality shows up in the history later
        log::info!(
            "session {} relayed transaction {}",
            self.session_id,
            tx_hash
        );
        Ok(())
    }

    async fn get_proving_provider(
        &self,
        key_material: Arc<dyn KeyMaterialProvider>,
    ) -> ConnectorResult<Arc<dyn ProvingProvider>> {
        self.guard(SessionMethod::GetProvingProvider)?;
        Ok(Arc::new(WalletProver::new(key_material)))
    }

    async fn get_configuration(&self) -> ConnectorResult<Configuration> {
        self.guard(SessionMethod::GetConfiguration)?;
        Ok(self.wallet.config.configuration(&self.network))
    }

    async fn get_connection_status(&self) -> ConnectorResult<ConnectionStatus> {
        // reports, never errors and never mutates
        if self.live.load(Ordering::SeqCst) {
            Ok(ConnectionStatus::Connected {
                network_id: self.network.network_id.clone(),
            })
        } else {
            Ok(ConnectionStatus::Disconnected)
        }
    }

    async fn hint_usage(&self, method_names: &[SessionMethod]) -> ConnectorResult<()> {
        self.ensure_live()?;
        // resolve consent for the hinted methods up front; a denial is the
        // user's answer to the prompt
        for method in method_names {
            self.wallet.config.consent.ensure_allowed(*method)?;
        }

        let mut hinted = self.hinted.write();
        for method in method_names {
            if !hinted.contains(method) {
                hinted.push(*method);
            }
        }
        log::debug!(
            "session {} hinted {} method(s)",
            self.session_id,
            hinted.len()
        );
        Ok(())
    }
}
