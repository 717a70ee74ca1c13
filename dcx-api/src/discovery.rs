//! Wallet discovery announcement.
//!
//! Wallets publish one announcement per implemented contract version at an
//! implementation-defined point during page load (see `dcx-registry` for
//! the process-wide surface). A DApp enumerates announcements, picks one,
//! and calls `connect` on its connector capability.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ConnectorResult;
use crate::session::WalletSession;

/// Entry point a wallet exposes before any connection exists.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Connect to the wallet, hinting the desired network id; use
    /// `"mainnet"` for mainnet. May suspend for an unbounded time while the
    /// wallet runs its consent flow. Rejects with `UserRejected`,
    /// `NetworkUnsupported` or `WalletFault`.
    async fn connect(&self, network_id: &str) -> ConnectorResult<Arc<dyn WalletSession>>;
}

/// One advertised wallet capability.
///
/// `rdns`, `name` and `icon` are untrusted presentation hints, to be treated
/// like a user-agent string: identifiers may be unknown, invalid or
/// misleading, and several announcements may carry the same one. Name and
/// icon must be rendered as text/image content, never as raw markup.
#[derive(Clone)]
pub struct WalletAnnouncement {
    /// Wallet identifier in reverse DNS notation (e.g. `com.example.wallet`),
    /// expected to stay stable across the product's lifetime.
    pub rdns: String,
    pub name: String,
    /// URL of a hosted resource or a base64 data URL.
    pub icon: String,
    /// Semver of the contract revision this announcement implements.
    pub api_version: String,
    pub connector: Arc<dyn WalletConnector>,
}

impl WalletAnnouncement {
    pub fn new(
        rdns: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        api_version: impl Into<String>,
        connector: Arc<dyn WalletConnector>,
    ) -> Self {
        WalletAnnouncement {
            rdns: rdns.into(),
            name: name.into(),
            icon: icon.into(),
            api_version: api_version.into(),
            connector,
        }
    }
}

impl fmt::Debug for WalletAnnouncement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletAnnouncement")
            .field("rdns", &self.rdns)
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("api_version", &self.api_version)
            .finish()
    }
}
