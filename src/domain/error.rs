//! Error types for celopay operations.
//!
//! Two layers: [`ClientError`] covers failures talking to the external
//! collaborators (directory API, JSON-RPC node), while [`TransferError`]
//! is the user-facing vocabulary of the transfer flow. Collaborator
//! messages pass through verbatim so a wallet-side rejection reads the
//! same here as it does at the provider.

use thiserror::Error;

// ============================================================================
// Client Errors
// ============================================================================

/// Failures from the HTTP and JSON-RPC collaborators.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-related errors from HTTP requests.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing or data structure errors.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// Non-success HTTP status from an API endpoint.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Body or status text returned by the endpoint.
        message: String,
    },

    /// Error object returned by a JSON-RPC endpoint.
    ///
    /// The message is surfaced verbatim; user rejections from a signer
    /// arrive through this variant.
    #[error("{message}")]
    Rpc {
        /// JSON-RPC error code (e.g. 4001 for a user rejection).
        code: i64,
        /// Provider-supplied message.
        message: String,
    },

    /// The endpoint answers for a different chain than requested.
    #[error("RPC endpoint reports chain id {actual}, expected {expected}")]
    ChainMismatch {
        /// Chain id that was required.
        expected: u64,
        /// Chain id the endpoint reported.
        actual: u64,
    },

    /// No receipt appeared within the polling budget.
    #[error("Timed out waiting for confirmation of {hash}")]
    ConfirmationTimeout {
        /// Hash of the transaction being watched.
        hash: String,
    },

    /// Invalid or missing local configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new API error from a status code and message.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new JSON-RPC error.
    #[must_use]
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Convert to a `color_eyre::Report` for API compatibility.
    #[must_use = "this converts the error into a Report for display"]
    pub fn into_report(self) -> color_eyre::Report {
        color_eyre::eyre::eyre!("{}", self)
    }
}

// ============================================================================
// Transfer Errors
// ============================================================================

/// User-facing failures of the transfer flow.
///
/// `Display` is the exact message shown to the user. The first three
/// variants are precondition failures resolved before any collaborator
/// call; the rest end an attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    /// No wallet connection.
    #[error("Please connect your wallet first")]
    NotConnected,

    /// No selection, or the selected account has no verified address.
    #[error("User has no verified Celo address")]
    NoVerifiedAddress,

    /// The amount input did not parse to a strictly positive value.
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// The wallet refused or failed to switch to the required network.
    #[error("{0}")]
    NetworkSwitchFailed(String),

    /// The known balance is below the requested amount.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// The wallet rejected or failed the submission.
    #[error("{0}")]
    SubmissionRejected(String),

    /// The transaction was broadcast but did not confirm.
    #[error("{0}")]
    ConfirmationFailed(String),
}

impl TransferError {
    /// Wraps a wallet-side switch failure, falling back to a generic
    /// message when the collaborator supplied none.
    #[must_use]
    pub fn network_switch(message: impl Into<String>) -> Self {
        Self::NetworkSwitchFailed(non_empty_or(message.into(), "Failed to switch network"))
    }

    /// Wraps a wallet-side submission failure, falling back to a
    /// generic message when the collaborator supplied none.
    #[must_use]
    pub fn submission(message: impl Into<String>) -> Self {
        Self::SubmissionRejected(non_empty_or(message.into(), "Transaction failed"))
    }

    /// Wraps a confirmation failure, falling back to a generic message
    /// when the collaborator supplied none.
    #[must_use]
    pub fn confirmation(message: impl Into<String>) -> Self {
        Self::ConfirmationFailed(non_empty_or(message.into(), "Transaction failed on-chain"))
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

// ============================================================================
// Tests
// ============================================================================
