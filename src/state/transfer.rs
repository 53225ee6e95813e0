//! Payment orchestration: precondition checks and the transfer
//! lifecycle.
//!
//! `send()` validates synchronously (connection, verified address,
//! amount), then drives the asynchronous steps strictly in order:
//! network switch if needed, optimistic balance check, submission,
//! confirmation watch. The phase walks
//! `Idle → AwaitingApproval → Confirming → Confirmed`, with `Failed`
//! reachable from either in-flight phase. Precondition failures never
//! leave `Idle` - they only set the current error message.
//!
//! At most one attempt is in flight; `send()` during an in-flight
//! attempt is ignored, so the orchestrator is safe against double
//! submission even if the caller forgets to disable its trigger. Once
//! broadcast, a transfer can only be observed, never canceled or
//! retried - every retry is a fresh user-initiated `send()`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use super::AppMessage;
use crate::domain::{Candidate, ChainNetwork, TransferError, parse_units};
use crate::wallet::{TxStatus, WalletProvider};

// ============================================================================
// Send Phase
// ============================================================================

/// Lifecycle state of the current (or last) transfer attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SendPhase {
    /// No attempt in flight.
    #[default]
    Idle,
    /// Preconditions passed; waiting for the wallet to accept and
    /// broadcast (covers the network switch and balance check too).
    AwaitingApproval,
    /// Broadcast; waiting for inclusion.
    Confirming,
    /// Terminal: the transaction confirmed.
    Confirmed,
    /// Terminal: the attempt failed with a user-facing message.
    Failed(String),
}

impl SendPhase {
    /// Returns `true` while an attempt is between submission request
    /// and terminal outcome.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::AwaitingApproval | Self::Confirming)
    }

    /// Returns `true` for the terminal phases.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed(_))
    }
}

// ============================================================================
// Transfer Attempt
// ============================================================================

/// Facts of one payment attempt, snapshotted when `send()` passed its
/// preconditions. Later changes to selection or amount input do not
/// affect an in-flight attempt.
#[derive(Debug, Clone)]
pub struct TransferAttempt {
    /// The account being paid.
    pub recipient: Candidate,
    /// Target address (the recipient's first verified address).
    pub to: String,
    /// Amount in smallest units (wei).
    pub value: u128,
    /// Transaction hash, once the wallet broadcast it.
    pub hash: Option<String>,
    /// When the attempt started.
    pub started_at: DateTime<Utc>,
}

// ============================================================================
// Transfer Orchestrator
// ============================================================================

/// Drives one payment at a time against the wallet collaborator.
#[derive(Debug)]
pub struct TransferOrchestrator<W: WalletProvider> {
    wallet: Arc<W>,
    required_network: ChainNetwork,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    phase: SendPhase,
    error: Option<String>,
    attempt: Option<TransferAttempt>,
}

impl<W: WalletProvider> TransferOrchestrator<W> {
    /// Creates an orchestrator enforcing the given required network.
    #[must_use]
    pub fn new(
        wallet: Arc<W>,
        required_network: ChainNetwork,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            wallet,
            required_network,
            message_tx,
            phase: SendPhase::Idle,
            error: None,
            attempt: None,
        }
    }

    /// Starts a payment to the selected account.
    ///
    /// Preconditions are checked synchronously, in order, short-
    /// circuiting on the first failure with its distinct message and
    /// zero collaborator calls. When they pass, the attempt is
    /// snapshotted, the phase moves to `AwaitingApproval`, and a task
    /// drives the remaining steps, reporting through the message
    /// channel.
    ///
    /// Calling this while an attempt is in flight does nothing.
    pub fn send(&mut self, selection: Option<&Candidate>, amount: &str) {
        if self.phase.is_in_flight() {
            tracing::debug!("send ignored: attempt already in flight");
            return;
        }

        self.error = None;

        if !self.wallet.account_state().connected {
            self.fail_precondition(&TransferError::NotConnected);
            return;
        }

        let Some(recipient) = selection else {
            self.fail_precondition(&TransferError::NoVerifiedAddress);
            return;
        };
        let Some(to) = recipient.payout_address() else {
            self.fail_precondition(&TransferError::NoVerifiedAddress);
            return;
        };
        let to = to.to_string();

        let decimals = self.required_network.native_decimals();
        let value = match parse_units(amount, decimals) {
            Ok(value) if value > 0 => value,
            _ => {
                self.fail_precondition(&TransferError::InvalidAmount);
                return;
            }
        };

        self.attempt = Some(TransferAttempt {
            recipient: recipient.clone(),
            to: to.clone(),
            value,
            hash: None,
            started_at: Utc::now(),
        });
        self.phase = SendPhase::AwaitingApproval;

        let wallet = Arc::clone(&self.wallet);
        let required = self.required_network;
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            drive_transfer(wallet, required, to, value, message_tx).await;
        });
    }

    fn fail_precondition(&mut self, error: &TransferError) {
        tracing::debug!("send precondition failed: {error}");
        self.error = Some(error.to_string());
    }

    /// Applies a transfer-related message; other messages are ignored.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::TransferSubmitted { hash } => {
                if let Some(attempt) = &mut self.attempt {
                    attempt.hash = Some(hash);
                }
                self.phase = SendPhase::Confirming;
            }
            AppMessage::TransferConfirmed { .. } => {
                self.phase = SendPhase::Confirmed;
            }
            AppMessage::TransferFailed { message } => {
                self.error = Some(message.clone());
                self.phase = SendPhase::Failed(message);
            }
            _ => {}
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> &SendPhase {
        &self.phase
    }

    /// Current user-facing error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current (or last) attempt.
    #[must_use]
    pub fn attempt(&self) -> Option<&TransferAttempt> {
        self.attempt.as_ref()
    }

    /// Network this orchestrator enforces.
    #[must_use]
    pub fn required_network(&self) -> ChainNetwork {
        self.required_network
    }
}

// ============================================================================
// Transfer Task
// ============================================================================

/// Runs the asynchronous steps of one attempt, strictly in order. Each
/// step settles before the next begins; the first failure ends the
/// attempt with a `TransferFailed` message.
async fn drive_transfer<W: WalletProvider>(
    wallet: Arc<W>,
    required: ChainNetwork,
    to: String,
    value: u128,
    message_tx: mpsc::UnboundedSender<AppMessage>,
) {
    let state = wallet.account_state();
    if !state.is_on(required) {
        tracing::info!(
            "wallet on chain {:?}, switching to {required}",
            state.chain_id
        );
        if let Err(e) = wallet.switch_network(required).await {
            let error = TransferError::network_switch(e.to_string());
            let _ = message_tx.send(AppMessage::TransferFailed {
                message: error.to_string(),
            });
            return;
        }
    }

    // Optimistic client-side check; on-chain enforcement is what counts,
    // so an unavailable or unparseable figure just skips it.
    if let Some(address) = wallet.account_state().address {
        match wallet.get_balance(&address, required).await {
            Ok(figure) => match parse_units(&figure, required.native_decimals()) {
                Ok(balance) if balance < value => {
                    let _ = message_tx.send(AppMessage::TransferFailed {
                        message: TransferError::InsufficientBalance.to_string(),
                    });
                    return;
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("ignoring unparseable balance '{figure}': {e}"),
            },
            Err(e) => tracing::debug!("balance unavailable, skipping check: {e}"),
        }
    }

    let hash = match wallet.send_payment(&to, value).await {
        Ok(hash) => hash,
        Err(e) => {
            let error = TransferError::submission(e.to_string());
            let _ = message_tx.send(AppMessage::TransferFailed {
                message: error.to_string(),
            });
            return;
        }
    };
    let _ = message_tx.send(AppMessage::TransferSubmitted { hash: hash.clone() });

    match wallet.watch_confirmation(&hash).await {
        Ok(TxStatus::Confirmed) => {
            let _ = message_tx.send(AppMessage::TransferConfirmed { hash });
        }
        Ok(TxStatus::Reverted) => {
            let error = TransferError::confirmation("Transaction reverted on-chain");
            let _ = message_tx.send(AppMessage::TransferFailed {
                message: error.to_string(),
            });
        }
        Err(e) => {
            let error = TransferError::confirmation(e.to_string());
            let _ = message_tx.send(AppMessage::TransferFailed {
                message: error.to_string(),
            });
        }
    }
}
