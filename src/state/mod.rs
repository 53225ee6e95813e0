//! State management for the celopay core.
//!
//! Two components own all mutable state, both driven by a
//! single-threaded event loop:
//!
//! - [`SearchController`] - debounced, cancelable username search with
//!   candidate list and selection
//! - [`TransferOrchestrator`] - precondition checks and the
//!   submit/confirm lifecycle of one payment attempt
//!
//! Background tasks never touch state directly: they post an
//! [`AppMessage`] and the loop applies it through the owning
//! component's `handle_message`. This keeps every mutation on the loop
//! and makes the components deterministic to test.

use crate::domain::Candidate;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod search;
pub mod transfer;

// ============================================================================
// Re-exports
// ============================================================================

pub use search::SearchController;
pub use transfer::{SendPhase, TransferAttempt, TransferOrchestrator};

// ============================================================================
// App Message Types
// ============================================================================

/// Messages sent from background tasks to the event loop.
// NOTE: Channel sends use `let _ = tx.send(...)` throughout. This is
// intentional fire-and-forget: the receiver may be dropped during
// shutdown, and we don't want to propagate those errors.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The debounce window elapsed without further keystrokes.
    SearchDebounceElapsed {
        /// Query the window was armed for.
        query: String,
    },
    /// A directory lookup settled, successfully or not.
    SearchCompleted {
        /// Generation the lookup was issued under; stale generations
        /// are discarded.
        generation: u64,
        /// The candidates, or the failure message.
        result: Result<Vec<Candidate>, String>,
    },
    /// The wallet accepted and broadcast the transfer.
    TransferSubmitted {
        /// Transaction hash returned by the wallet.
        hash: String,
    },
    /// The confirmation watch reported inclusion and success.
    TransferConfirmed {
        /// Hash of the confirmed transaction.
        hash: String,
    },
    /// An asynchronous transfer step failed; the attempt is over.
    TransferFailed {
        /// User-facing failure message.
        message: String,
    },
}

// ============================================================================
// Tests
// ============================================================================
