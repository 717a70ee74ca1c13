use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigUint;
use parking_lot::RwLock;
use uuid::Uuid;

use dcx_api::{
    ConnectorError, ConnectorResult, ExecutionStatus, TokenKind, TxStatus, WalletAnnouncement,
    WalletConnector, WalletSession,
};
use dcx_common::FromHex;
use dcx_constants::{network_info_from_id, API_VERSION};

use crate::config::WalletConfig;
use crate::keys::WalletKeys;
use crate::ledger::LedgerState;
use crate::session::SessionHandle;
use crate::Result;

pub(crate) struct WalletInner {
    pub(crate) config: WalletConfig,
    pub(crate) keys: WalletKeys,
    pub(crate) ledger: RwLock<LedgerState>,
    live_sessions: RwLock<Vec<Arc<AtomicBool>>>,
}

/// The wallet extension, as far as a page can see it. Owns all mutable
/// state; sessions only hold a handle back into it.
#[derive(Clone)]
pub struct Wallet {
    inner: Arc<WalletInner>,
}

impl Wallet {
    pub fn new(seed: &[u8], config: WalletConfig) -> Result<Wallet> {
        Ok(Wallet {
            inner: Arc::new(WalletInner {
                config,
                keys: WalletKeys::from_seed(seed)?,
                ledger: RwLock::new(LedgerState::new()),
                live_sessions: RwLock::new(Vec::new()),
            }),
        })
    }

    pub fn from_hex_seed(seed: &str, config: WalletConfig) -> Result<Wallet> {
        let seed = Vec::from_hex(seed)?;
        Wallet::new(&seed, config)
    }

    /// Publish this wallet into the process-wide discovery registry, the
    /// way an extension injects itself during page load.
    pub fn announce(&self) {
        let config = &self.inner.config;
        dcx_registry::announce(WalletAnnouncement::new(
            config.rdns.clone(),
            config.name.clone(),
            config.icon.clone(),
            API_VERSION,
            Arc::new(self.clone()),
        ));
    }

    pub fn credit_shielded(&self, token_type: &str, value: u64) {
        self.inner.ledger.write().credit(
            TokenKind::Shielded,
            &token_type.to_string(),
            &BigUint::from(value),
        );
    }

    pub fn credit_unshielded(&self, token_type: &str, value: u64) {
        self.inner.ledger.write().credit(
            TokenKind::Unshielded,
            &token_type.to_string(),
            &BigUint::from(value),
        );
    }

    pub fn set_dust(&self, balance: u64, cap: u64) {
        self.inner
            .ledger
            .write()
            .set_dust(BigUint::from(balance), BigUint::from(cap));
    }

    /// Wallet-side revocation: every live session flips to disconnected and
    /// stays there. The contract has no DApp-side teardown; this is the
    /// only way a session ends.
    pub fn revoke_sessions(&self) {
        let live_sessions = self.inner.live_sessions.read();
        log::info!("revoking {} live session(s)", live_sessions.len());
        for live in live_sessions.iter() {
            live.store(false, Ordering::SeqCst);
        }
    }

    pub fn confirm_transaction(&self, tx_hash: &str, execution_status: ExecutionStatus) -> bool {
        self.inner
            .ledger
            .write()
            .set_tx_status(tx_hash, TxStatus::Confirmed { execution_status })
    }

    pub fn finalize_transaction(&self, tx_hash: &str, execution_status: ExecutionStatus) -> bool {
        self.inner
            .ledger
            .write()
            .set_tx_status(tx_hash, TxStatus::Finalized { execution_status })
    }

    pub fn discard_transaction(&self, tx_hash: &str) -> bool {
        self.inner
            .ledger
            .write()
            .set_tx_status(tx_hash, TxStatus::Discarded)
    }
}

#[async_trait]
impl WalletConnector for Wallet {
    async fn connect(&self, network_id: &str) -> ConnectorResult<Arc<dyn WalletSession>> {
        let inner = &self.inner;
        dcx_api::dcx_ensure!(
            inner.config.consent.allows_connect(),
            ConnectorError::UserRejected
        );
        dcx_api::dcx_ensure!(
            inner.config.supports_network(network_id),
            ConnectorError::NetworkUnsupported
        );
        let network =
            network_info_from_id(network_id).map_err(|_| ConnectorError::NetworkUnsupported)?;

        let live = Arc::new(AtomicBool::new(true));
        inner.live_sessions.write().push(live.clone());

        let session_id = Uuid::new_v4().to_string();
        log::info!(
            "session {} connected to {} (rdns={})",
            session_id,
            network_id,
            inner.config.rdns
        );
        Ok(Arc::new(SessionHandle::new(
            inner.clone(),
            network,
            session_id,
            live,
        )))
    }
}
