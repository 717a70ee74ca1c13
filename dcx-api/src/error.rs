use thiserror::Error;

/// Closed error taxonomy of the connector boundary.
///
/// Every operation rejects with exactly one of these kinds; wallets map
/// their internal faults onto them instead of leaking ad hoc messages, so
/// DApps can branch on the kind without parsing strings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorError {
    /// The user refused consent for the connection or operation.
    #[error("user_rejected")]
    UserRejected,
    /// The requested network id is not served by this wallet.
    #[error("network_unsupported")]
    NetworkUnsupported,
    /// The session was invalidated wallet-side; a new `connect` is required.
    #[error("session_disconnected")]
    SessionDisconnected,
    /// The wallet cannot cover the requested value or fees.
    #[error("insufficient_funds")]
    InsufficientFunds,
    /// Undecodable transaction, wrong construction stage, or a transaction
    /// bound to a different network.
    #[error("invalid_transaction")]
    InvalidTransaction,
    /// A recipient address that does not match its token kind or the
    /// session's network.
    #[error("invalid_address")]
    InvalidAddress,
    /// A signing payload that cannot be decoded with the declared encoding.
    #[error("invalid_payload")]
    InvalidPayload,
    /// Any wallet-internal fault with no more specific kind.
    #[error("wallet_fault")]
    WalletFault,
}

pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;
