//! Wallet collaborator: the provider contract and a node-backed
//! implementation.
//!
//! The transfer flow never mutates wallet state directly - it reads
//! [`AccountState`] snapshots and issues request operations through
//! [`WalletProvider`]. [`NodeWallet`] implements the contract against an
//! EVM JSON-RPC endpoint whose node manages the sending account;
//! rejections and signer failures surface as the endpoint's own error
//! messages.

use std::future::Future;

use tokio::sync::{Mutex, watch};
use tokio::time::sleep;

use crate::client::RpcClient;
use crate::constants::{RECEIPT_POLL_ATTEMPTS, RECEIPT_POLL_INTERVAL};
use crate::domain::{ChainNetwork, ClientError, format_units};

// ============================================================================
// Account State
// ============================================================================

/// Snapshot of the wallet connection.
///
/// Owned and refreshed by the wallet collaborator; everything else only
/// reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountState {
    /// Whether a wallet connection is established.
    pub connected: bool,
    /// Address of the connected account.
    pub address: Option<String>,
    /// Chain id the wallet is currently on.
    pub chain_id: Option<u64>,
}

impl AccountState {
    /// A disconnected wallet.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Returns the known network, if the chain id maps to one.
    #[must_use]
    pub fn network(&self) -> Option<ChainNetwork> {
        self.chain_id.and_then(ChainNetwork::from_chain_id)
    }

    /// Returns `true` if the wallet is on the given network.
    #[must_use]
    pub fn is_on(&self, network: ChainNetwork) -> bool {
        self.chain_id == Some(network.chain_id())
    }
}

// ============================================================================
// Confirmation Status
// ============================================================================

/// Terminal outcome of a confirmation watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// The transaction was included and executed successfully.
    Confirmed,
    /// The transaction was included but reverted.
    Reverted,
}

// ============================================================================
// Wallet Provider Contract
// ============================================================================

/// Contract of the wallet collaborator.
///
/// `account_state` is a synchronous snapshot read; the remaining
/// operations are asynchronous requests. Futures are `Send` because the
/// transfer flow drives them from a spawned task.
pub trait WalletProvider: Send + Sync + 'static {
    /// Current connection snapshot.
    fn account_state(&self) -> AccountState;

    /// Establish (or re-establish) the wallet connection.
    ///
    /// # Errors
    ///
    /// Returns an error when the wallet backend is unreachable.
    fn connect(&self) -> impl Future<Output = Result<AccountState, ClientError>> + Send;

    /// Ask the wallet to move to the given network.
    ///
    /// # Errors
    ///
    /// Returns an error when the switch is rejected or fails.
    fn switch_network(
        &self,
        network: ChainNetwork,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Fetch the native balance of `address` as a formatted decimal
    /// string in the display unit.
    ///
    /// # Errors
    ///
    /// Returns an error when no balance figure is available.
    fn get_balance(
        &self,
        address: &str,
        network: ChainNetwork,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Submit a native-value payment. Resolves to the transaction hash
    /// once the wallet accepts and broadcasts it.
    ///
    /// # Errors
    ///
    /// Returns an error when the user rejects or the provider fails.
    fn send_payment(
        &self,
        to: &str,
        value: u128,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Wait for the transaction to reach a terminal status.
    ///
    /// # Errors
    ///
    /// Returns an error when the watch itself fails (e.g. times out).
    fn watch_confirmation(
        &self,
        hash: &str,
    ) -> impl Future<Output = Result<TxStatus, ClientError>> + Send;
}

// ============================================================================
// Node Wallet
// ============================================================================

/// Wallet backed by a JSON-RPC node that manages the sending account.
///
/// Connection state is published through a `watch` channel so callers
/// can subscribe to changes instead of polling.
#[derive(Debug)]
pub struct NodeWallet {
    rpc: Mutex<RpcClient>,
    account: String,
    state_tx: watch::Sender<AccountState>,
}

impl NodeWallet {
    /// Create a wallet for the given network's default endpoint.
    #[must_use]
    pub fn new(network: ChainNetwork, account: impl Into<String>) -> Self {
        Self::with_endpoint(network.rpc_url(), account)
    }

    /// Create a wallet against a specific JSON-RPC endpoint.
    #[must_use]
    pub fn with_endpoint(url: impl Into<String>, account: impl Into<String>) -> Self {
        let (state_tx, _) = watch::channel(AccountState::disconnected());
        Self {
            rpc: Mutex::new(RpcClient::new(url)),
            account: account.into(),
            state_tx,
        }
    }

    /// Subscribe to connection-state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AccountState> {
        self.state_tx.subscribe()
    }

    async fn rpc(&self) -> RpcClient {
        self.rpc.lock().await.clone()
    }

    fn publish(&self, state: AccountState) {
        // Fire-and-forget: there may be no subscribers
        let _ = self.state_tx.send(state);
    }
}

impl WalletProvider for NodeWallet {
    fn account_state(&self) -> AccountState {
        self.state_tx.borrow().clone()
    }

    async fn connect(&self) -> Result<AccountState, ClientError> {
        let chain_id = self.rpc().await.chain_id().await?;
        let state = AccountState {
            connected: true,
            address: Some(self.account.clone()),
            chain_id: Some(chain_id),
        };
        self.publish(state.clone());
        tracing::debug!("wallet connected on chain {chain_id}");
        Ok(state)
    }

    async fn switch_network(&self, network: ChainNetwork) -> Result<(), ClientError> {
        let endpoint = RpcClient::new(network.rpc_url());
        let actual = endpoint.chain_id().await?;
        if actual != network.chain_id() {
            return Err(ClientError::ChainMismatch {
                expected: network.chain_id(),
                actual,
            });
        }

        {
            let mut rpc = self.rpc.lock().await;
            *rpc = endpoint;
        }
        let mut state = self.account_state();
        state.chain_id = Some(actual);
        self.publish(state);
        tracing::info!("switched to {network}");
        Ok(())
    }

    async fn get_balance(
        &self,
        address: &str,
        network: ChainNetwork,
    ) -> Result<String, ClientError> {
        let wei = self.rpc().await.get_balance(address).await?;
        Ok(format_units(wei, network.native_decimals()))
    }

    async fn send_payment(&self, to: &str, value: u128) -> Result<String, ClientError> {
        self.rpc()
            .await
            .send_transaction(&self.account, to, value)
            .await
    }

    async fn watch_confirmation(&self, hash: &str) -> Result<TxStatus, ClientError> {
        let rpc = self.rpc().await;
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            if let Some(receipt) = rpc.transaction_receipt(hash).await? {
                return Ok(if receipt.succeeded() {
                    TxStatus::Confirmed
                } else {
                    TxStatus::Reverted
                });
            }
            sleep(RECEIPT_POLL_INTERVAL).await;
        }
        Err(ClientError::ConfirmationTimeout {
            hash: hash.to_string(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_state_disconnected() {
        let state = AccountState::disconnected();
        assert!(!state.connected);
        assert!(state.address.is_none());
        assert!(state.chain_id.is_none());
        assert!(state.network().is_none());
    }

    #[test]
    fn test_account_state_network_mapping() {
        let state = AccountState {
            connected: true,
            address: Some("0xabc".to_string()),
            chain_id: Some(42220),
        };
        assert_eq!(state.network(), Some(ChainNetwork::MainNet));
        assert!(state.is_on(ChainNetwork::MainNet));
        assert!(!state.is_on(ChainNetwork::Alfajores));
    }

    #[test]
    fn test_unknown_chain_id_has_no_network() {
        let state = AccountState {
            connected: true,
            address: None,
            chain_id: Some(1),
        };
        assert_eq!(state.network(), None);
        assert!(!state.is_on(ChainNetwork::MainNet));
    }

    #[test]
    fn test_node_wallet_starts_disconnected() {
        let wallet = NodeWallet::new(ChainNetwork::MainNet, "0xabc");
        assert_eq!(wallet.account_state(), AccountState::disconnected());
    }

    #[tokio::test]
    async fn test_subscribe_sees_published_state() {
        let wallet = NodeWallet::new(ChainNetwork::MainNet, "0xabc");
        let mut rx = wallet.subscribe();

        let state = AccountState {
            connected: true,
            address: Some("0xabc".to_string()),
            chain_id: Some(42220),
        };
        wallet.publish(state.clone());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), state);
    }
}
