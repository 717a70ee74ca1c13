use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ConnectorError, ConnectorResult};
use crate::history::HistoryEntry;
use crate::proving::{KeyMaterialProvider, ProvingProvider};
use crate::transaction::{
    DesiredInput, DesiredOutput, MakeIntentOptions, SealedTransaction, UnsealedTransaction,
};
use crate::types::{
    Configuration, DustAddress, DustBalance, ShieldedAddresses, SignDataOptions, Signature,
    TokenBalances, UnshieldedAddress,
};

/// Status of an existing connection: established to a specific network id,
/// or lost for good.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConnectionStatus {
    #[serde(rename_all = "camelCase")]
    Connected { network_id: String },
    Disconnected,
}

/// An established connection between one DApp context and one wallet,
/// scoped to one network id for its whole lifetime.
///
/// All operations are asynchronous request/response calls with no ordering
/// guarantee between concurrent calls; any of them may suspend for wallet
/// UI, proof computation or network relay. No cancellation or timeout is
/// defined here; callers wanting bounded waits layer their own. Once a
/// session reports `Disconnected` it cannot be revived; every operation on
/// it fails with `SessionDisconnected`.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Balances of shielded tokens, keyed by token type.
    async fn get_shielded_balances(&self) -> ConnectorResult<TokenBalances>;

    /// Balances of unshielded tokens (potentially including Night), keyed by
    /// token type.
    async fn get_unshielded_balances(&self) -> ConnectorResult<TokenBalances>;

    /// Current Dust balance and the cap generable from the current Night
    /// holdings.
    async fn get_dust_balance(&self) -> ConnectorResult<DustBalance>;

    async fn get_shielded_addresses(&self) -> ConnectorResult<ShieldedAddresses>;

    async fn get_unshielded_address(&self) -> ConnectorResult<UnshieldedAddress>;

    async fn get_dust_address(&self) -> ConnectorResult<DustAddress>;

    /// One page of the wallet's transaction history. Pagination convention
    /// is wallet-defined; the reference wallet serves zero-indexed pages,
    /// newest first, computed from a snapshot taken at call time.
    async fn get_tx_history(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> ConnectorResult<Vec<HistoryEntry>>;

    /// Take an unsealed transaction, pay fees and add inputs/outputs until
    /// no imbalance remains, then seal it ready for submission. The path for
    /// contract-interacting transactions, fallible sections included, where
    /// balancing must happen before sealing.
    async fn balance_unsealed_transaction(
        &self,
        tx: UnsealedTransaction,
    ) -> ConnectorResult<SealedTransaction>;

    /// Balance an already sealed transaction by adding a separate wallet
    /// intent; the existing intents' binding is left untouched. Rejected
    /// when an imbalanced fallible section is present; such transactions
    /// must go through `balance_unsealed_transaction`.
    async fn balance_sealed_transaction(
        &self,
        tx: SealedTransaction,
    ) -> ConnectorResult<SealedTransaction>;

    /// Construct a complete, balanced, ready-to-submit transfer to one or
    /// more recipients.
    async fn make_transfer(
        &self,
        desired_outputs: Vec<DesiredOutput>,
    ) -> ConnectorResult<SealedTransaction>;

    /// Construct a transaction carrying one unbalanced intent with explicit
    /// desired inputs and outputs; the usual opening move of a swap.
    async fn make_intent(
        &self,
        desired_inputs: Vec<DesiredInput>,
        desired_outputs: Vec<DesiredOutput>,
        options: MakeIntentOptions,
    ) -> ConnectorResult<SealedTransaction>;

    /// Sign `data` with the key named in `options`, after prepending the
    /// wallet's domain-separation prefix. Deterministic for identical input
    /// and key in the reference wallet.
    async fn sign_data(&self, data: &str, options: SignDataOptions) -> ConnectorResult<Signature>;

    /// Relay a sealed, balanced transaction to the network. Resolution means
    /// relay acceptance, not chain finality; finality is observed through
    /// `get_tx_history`.
    async fn submit_transaction(&self, tx: SealedTransaction) -> ConnectorResult<()>;

    /// Obtain a proving handle that sources key material from the supplied
    /// provider while keeping proof computation wallet-side.
    async fn get_proving_provider(
        &self,
        key_material: Arc<dyn KeyMaterialProvider>,
    ) -> ConnectorResult<Arc<dyn ProvingProvider>>;

    /// Service endpoints the wallet currently uses.
    async fn get_configuration(&self) -> ConnectorResult<Configuration>;

    /// Must be safe to poll repeatedly and must not alter session state.
    async fn get_connection_status(&self) -> ConnectorResult<ConnectionStatus>;

    /// Hint which methods the DApp expects to use in an upcoming context
    /// (a view, a flow, a whole session). The wallet may resolve consent
    /// prompts before returning. Purely an optimization hook: calling an
    /// un-hinted method stays permitted.
    async fn hint_usage(&self, method_names: &[SessionMethod]) -> ConnectorResult<()>;
}

/// Names of the session methods, for usage hinting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionMethod {
    GetShieldedBalances,
    GetUnshieldedBalances,
    GetDustBalance,
    GetShieldedAddresses,
    GetUnshieldedAddress,
    GetDustAddress,
    GetTxHistory,
    BalanceUnsealedTransaction,
    BalanceSealedTransaction,
    MakeTransfer,
    MakeIntent,
    SignData,
    SubmitTransaction,
    GetProvingProvider,
    GetConfiguration,
    GetConnectionStatus,
}

impl FromStr for SessionMethod {
    type Err = ConnectorError;

    fn from_str(input: &str) -> std::result::Result<SessionMethod, Self::Err> {
        match input {
            "getShieldedBalances" => Ok(SessionMethod::GetShieldedBalances),
            "getUnshieldedBalances" => Ok(SessionMethod::GetUnshieldedBalances),
            "getDustBalance" => Ok(SessionMethod::GetDustBalance),
            "getShieldedAddresses" => Ok(SessionMethod::GetShieldedAddresses),
            "getUnshieldedAddress" => Ok(SessionMethod::GetUnshieldedAddress),
            "getDustAddress" => Ok(SessionMethod::GetDustAddress),
            "getTxHistory" => Ok(SessionMethod::GetTxHistory),
            "balanceUnsealedTransaction" => Ok(SessionMethod::BalanceUnsealedTransaction),
            "balanceSealedTransaction" => Ok(SessionMethod::BalanceSealedTransaction),
            "makeTransfer" => Ok(SessionMethod::MakeTransfer),
            "makeIntent" => Ok(SessionMethod::MakeIntent),
            "signData" => Ok(SessionMethod::SignData),
            "submitTransaction" => Ok(SessionMethod::SubmitTransaction),
            "getProvingProvider" => Ok(SessionMethod::GetProvingProvider),
            "getConfiguration" => Ok(SessionMethod::GetConfiguration),
            "getConnectionStatus" => Ok(SessionMethod::GetConnectionStatus),
            _ => Err(ConnectorError::WalletFault),
        }
    }
}

impl fmt::Display for SessionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method_str = match self {
            SessionMethod::GetShieldedBalances => "getShieldedBalances",
            SessionMethod::GetUnshieldedBalances => "getUnshieldedBalances",
            SessionMethod::GetDustBalance => "getDustBalance",
            SessionMethod::GetShieldedAddresses => "getShieldedAddresses",
            SessionMethod::GetUnshieldedAddress => "getUnshieldedAddress",
            SessionMethod::GetDustAddress => "getDustAddress",
            SessionMethod::GetTxHistory => "getTxHistory",
            SessionMethod::BalanceUnsealedTransaction => "balanceUnsealedTransaction",
            SessionMethod::BalanceSealedTransaction => "balanceSealedTransaction",
            SessionMethod::MakeTransfer => "makeTransfer",
            SessionMethod::MakeIntent => "makeIntent",
            SessionMethod::SignData => "signData",
            SessionMethod::SubmitTransaction => "submitTransaction",
            SessionMethod::GetProvingProvider => "getProvingProvider",
            SessionMethod::GetConfiguration => "getConfiguration",
            SessionMethod::GetConnectionStatus => "getConnectionStatus",
        };
        write!(f, "{}", method_str)
    }
}
