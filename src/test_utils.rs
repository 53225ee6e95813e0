//! Shared test utilities and Mother pattern factories.
//!
//! Scripted collaborator doubles for the search and transfer flows.
//! Both mocks record every call they receive so tests can assert not
//! just outcomes but call counts and ordering.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::sleep;

use crate::client::IdentityProvider;
use crate::domain::{Candidate, ChainNetwork, ClientError};
use crate::wallet::{AccountState, TxStatus, WalletProvider};

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct CandidateMother;

impl CandidateMother {
    /// A candidate with one verified address derived from its fid.
    #[must_use]
    pub fn verified(fid: u64, username: &str) -> Candidate {
        Candidate {
            fid,
            username: username.to_string(),
            display_name: format!("{username} display"),
            pfp_url: Some(format!("https://example.com/{username}.png")),
            verified_addresses: vec![format!("0x{fid:040x}")],
        }
    }

    /// A candidate with two verified addresses.
    #[must_use]
    pub fn multi_address(fid: u64, username: &str, first: &str, second: &str) -> Candidate {
        Candidate {
            verified_addresses: vec![first.to_string(), second.to_string()],
            ..Self::verified(fid, username)
        }
    }

    /// A candidate without any verified address.
    #[must_use]
    pub fn unverified(fid: u64, username: &str) -> Candidate {
        Candidate {
            verified_addresses: Vec::new(),
            ..Self::verified(fid, username)
        }
    }
}

// ============================================================================
// Mock Identity Provider
// ============================================================================

/// Scripted identity provider with per-query responses and delays.
///
/// Unscripted queries resolve to an empty list. Delays run on the tokio
/// clock, so paused-time tests control resolution order precisely.
#[derive(Debug, Default)]
pub struct MockIdentity {
    responses: Mutex<HashMap<String, Result<Vec<Candidate>, String>>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl MockIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response for a query.
    #[must_use]
    pub fn respond(self, query: &str, candidates: Vec<Candidate>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(candidates));
        self
    }

    /// Script a failure for a query.
    #[must_use]
    pub fn fail(self, query: &str, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(message.to_string()));
        self
    }

    /// Delay the resolution of a query's lookup.
    #[must_use]
    pub fn delay(self, query: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(query.to_string(), delay);
        self
    }

    /// Queries this provider has been asked, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl IdentityProvider for MockIdentity {
    async fn search(&self, query: &str, _limit: usize) -> Result<Vec<Candidate>, ClientError> {
        self.calls.lock().unwrap().push(query.to_string());
        let delay = self.delays.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        let response = self.responses.lock().unwrap().get(query).cloned();
        match response {
            Some(Ok(candidates)) => Ok(candidates),
            Some(Err(message)) => Err(ClientError::api(500, message)),
            None => Ok(Vec::new()),
        }
    }
}

// ============================================================================
// Mock Wallet Provider
// ============================================================================

/// Scripted wallet with an ordered operation log.
///
/// Defaults to a generous balance, an accepting signer, and a clean
/// confirmation; builder methods script each step's failure.
#[derive(Debug)]
pub struct MockWallet {
    state: Mutex<AccountState>,
    balance: Mutex<Result<String, String>>,
    switch_result: Mutex<Result<(), String>>,
    send_result: Mutex<Result<String, String>>,
    confirm_result: Mutex<Result<TxStatus, String>>,
    ops: Mutex<Vec<&'static str>>,
    switch_calls: Mutex<Vec<ChainNetwork>>,
    send_calls: Mutex<Vec<(String, u128)>>,
}

impl MockWallet {
    /// A wallet with no connection.
    #[must_use]
    pub fn disconnected() -> Self {
        Self {
            state: Mutex::new(AccountState::disconnected()),
            balance: Mutex::new(Ok("1000000".to_string())),
            switch_result: Mutex::new(Ok(())),
            send_result: Mutex::new(Ok("0xhash".to_string())),
            confirm_result: Mutex::new(Ok(TxStatus::Confirmed)),
            ops: Mutex::new(Vec::new()),
            switch_calls: Mutex::new(Vec::new()),
            send_calls: Mutex::new(Vec::new()),
        }
    }

    /// A connected wallet sitting on the given network.
    #[must_use]
    pub fn connected_on(network: ChainNetwork) -> Self {
        let wallet = Self::disconnected();
        *wallet.state.lock().unwrap() = AccountState {
            connected: true,
            address: Some("0xsender".to_string()),
            chain_id: Some(network.chain_id()),
        };
        wallet
    }

    #[must_use]
    pub fn with_balance(self, figure: &str) -> Self {
        *self.balance.lock().unwrap() = Ok(figure.to_string());
        self
    }

    #[must_use]
    pub fn with_balance_error(self, message: &str) -> Self {
        *self.balance.lock().unwrap() = Err(message.to_string());
        self
    }

    #[must_use]
    pub fn with_switch_error(self, message: &str) -> Self {
        *self.switch_result.lock().unwrap() = Err(message.to_string());
        self
    }

    #[must_use]
    pub fn with_send_hash(self, hash: &str) -> Self {
        *self.send_result.lock().unwrap() = Ok(hash.to_string());
        self
    }

    #[must_use]
    pub fn with_send_error(self, message: &str) -> Self {
        *self.send_result.lock().unwrap() = Err(message.to_string());
        self
    }

    #[must_use]
    pub fn with_confirmation(self, status: TxStatus) -> Self {
        *self.confirm_result.lock().unwrap() = Ok(status);
        self
    }

    #[must_use]
    pub fn with_confirmation_error(self, message: &str) -> Self {
        *self.confirm_result.lock().unwrap() = Err(message.to_string());
        self
    }

    /// Ordered log of collaborator operations.
    #[must_use]
    pub fn op_log(&self) -> Vec<&'static str> {
        self.ops.lock().unwrap().clone()
    }

    /// Networks passed to `switch_network`, in order.
    #[must_use]
    pub fn switch_calls(&self) -> Vec<ChainNetwork> {
        self.switch_calls.lock().unwrap().clone()
    }

    /// `(to, value)` pairs passed to `send_payment`, in order.
    #[must_use]
    pub fn send_calls(&self) -> Vec<(String, u128)> {
        self.send_calls.lock().unwrap().clone()
    }
}

impl WalletProvider for MockWallet {
    fn account_state(&self) -> AccountState {
        self.state.lock().unwrap().clone()
    }

    async fn connect(&self) -> Result<AccountState, ClientError> {
        self.ops.lock().unwrap().push("connect");
        let mut state = self.state.lock().unwrap();
        state.connected = true;
        Ok(state.clone())
    }

    async fn switch_network(&self, network: ChainNetwork) -> Result<(), ClientError> {
        self.ops.lock().unwrap().push("switch");
        self.switch_calls.lock().unwrap().push(network);
        let result = self.switch_result.lock().unwrap().clone();
        match result {
            Ok(()) => {
                self.state.lock().unwrap().chain_id = Some(network.chain_id());
                Ok(())
            }
            Err(message) => Err(ClientError::rpc(4001, message)),
        }
    }

    async fn get_balance(
        &self,
        _address: &str,
        _network: ChainNetwork,
    ) -> Result<String, ClientError> {
        self.ops.lock().unwrap().push("balance");
        let result = self.balance.lock().unwrap().clone();
        result.map_err(|message| ClientError::api(500, message))
    }

    async fn send_payment(&self, to: &str, value: u128) -> Result<String, ClientError> {
        self.ops.lock().unwrap().push("send");
        self.send_calls
            .lock()
            .unwrap()
            .push((to.to_string(), value));
        let result = self.send_result.lock().unwrap().clone();
        result.map_err(|message| ClientError::rpc(4001, message))
    }

    async fn watch_confirmation(&self, _hash: &str) -> Result<TxStatus, ClientError> {
        self.ops.lock().unwrap().push("confirm");
        let result = self.confirm_result.lock().unwrap().clone();
        result.map_err(|message| ClientError::rpc(-32000, message))
    }
}
