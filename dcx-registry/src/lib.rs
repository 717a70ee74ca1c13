//! Process-wide wallet discovery registry.
//!
//! The well-known surface wallets announce themselves on during load, and
//! DApps read from, without prior coordination. Append-only for the life of
//! the process: no operation removes an entry, and nothing here
//! authenticates one. An rdns identifier is a presentation hint, not a
//! security boundary; several announcements may legitimately share one
//! (multiple contract versions of one wallet) or spoof one.

#[macro_use]
extern crate lazy_static;

use parking_lot::RwLock;

use dcx_api::WalletAnnouncement;

lazy_static! {
    static ref ANNOUNCEMENTS: RwLock<Vec<WalletAnnouncement>> = RwLock::new(Vec::new());
}

/// Publish a wallet announcement. Wallets call this once per implemented
/// contract version at load time.
pub fn announce(entry: WalletAnnouncement) {
    log::info!(
        "wallet announced: rdns={} api_version={}",
        entry.rdns,
        entry.api_version
    );
    let mut announcements = ANNOUNCEMENTS.write();
    announcements.push(entry);
}

/// Snapshot of every announcement made so far, in announcement order.
pub fn announced_wallets() -> Vec<WalletAnnouncement> {
    let announcements = ANNOUNCEMENTS.read();
    announcements.clone()
}

/// Every announcement carrying the given rdns identifier. Plural, since
/// identifier collisions are legal and the caller decides what to trust.
pub fn wallets_by_rdns(rdns: &str) -> Vec<WalletAnnouncement> {
    let announcements = ANNOUNCEMENTS.read();
    announcements
        .iter()
        .filter(|x| x.rdns == rdns)
        .cloned()
        .collect()
}

/// Test-only: drop every announcement so a suite can start from a clean
/// slate. Real pages never remove entries.
#[doc(hidden)]
pub fn reset() {
    ANNOUNCEMENTS.write().clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serial_test::serial;
    use std::sync::Arc;

    use dcx_api::{ConnectorError, ConnectorResult, WalletConnector, WalletSession};

    struct StubConnector;

    #[async_trait]
    impl WalletConnector for StubConnector {
        async fn connect(&self, _network_id: &str) -> ConnectorResult<Arc<dyn WalletSession>> {
            Err(ConnectorError::UserRejected)
        }
    }

    fn stub_announcement(rdns: &str, api_version: &str) -> WalletAnnouncement {
        WalletAnnouncement::new(
            rdns,
            "Stub Wallet",
            "data:image/svg+xml;base64,",
            api_version,
            Arc::new(StubConnector),
        )
    }

    #[test]
    #[serial]
    fn test_announce_is_append_only() {
        reset();
        announce(stub_announcement("com.example.wallet", "1.0.0"));
        announce(stub_announcement("com.example.wallet", "2.0.0"));
        announce(stub_announcement("org.other.wallet", "1.0.0"));

        let all = announced_wallets();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].api_version, "1.0.0");
        assert_eq!(all[1].api_version, "2.0.0");
    }

    #[test]
    #[serial]
    fn test_rdns_lookup_returns_every_match() {
        reset();
        announce(stub_announcement("com.example.wallet", "1.0.0"));
        announce(stub_announcement("com.example.wallet", "2.0.0"));

        let matches = wallets_by_rdns("com.example.wallet");
        assert_eq!(matches.len(), 2);
        assert!(wallets_by_rdns("org.unknown").is_empty());
    }
}
