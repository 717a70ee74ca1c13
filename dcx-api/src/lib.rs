//! DApp connector contract.
//!
//! This crate defines the shapes a browser DApp and a wallet agree on: the
//! discovery announcement, the connection session and every operation it
//! exposes, and the closed error taxonomy failures are reported through.
//! It contains no wallet logic; `dcx-wallet` ships the reference
//! implementation and `dcx-registry` the process-wide discovery surface.

#[cfg_attr(tarpaulin, ignore)]
#[macro_use]
mod macros {
    #[macro_export]
    macro_rules! dcx_ensure {
        ($cond:expr, $e:expr) => {
            if !($cond) {
                return Err($e.into());
            }
        };
    }
}

pub mod discovery;
pub mod error;
pub mod history;
pub mod proving;
pub mod session;
pub mod transaction;
pub mod types;

pub use discovery::{WalletAnnouncement, WalletConnector};
pub use error::{ConnectorError, ConnectorResult};
pub use history::{ExecutionStatus, HistoryEntry, SegmentStatus, TxStatus};
pub use proving::{KeyMaterialProvider, ProvingProvider};
pub use session::{ConnectionStatus, SessionMethod, WalletSession};
pub use transaction::{
    DesiredInput, DesiredOutput, IntentId, MakeIntentOptions, SealedTransaction, TokenKind,
    UnsealedTransaction,
};
pub use types::{
    Configuration, DustAddress, DustBalance, KeyType, ShieldedAddresses, SignDataOptions,
    Signature, TokenBalances, TokenType, UnshieldedAddress,
};

pub use dcx_common::PayloadEncoding;
