//! HTTP clients for celopay's external collaborators.
//!
//! This module provides typed clients for interacting with:
//! - Farcaster directory (Neynar API) - username search
//! - EVM JSON-RPC node - chain state and transaction submission
//!
//! # Example
//!
//! ```ignore
//! use crate::client::{FarcasterClient, RpcClient};
//!
//! let directory = FarcasterClient::new(api_key);
//! let node = RpcClient::new("https://forno.celo.org");
//! ```

use std::future::Future;

use crate::domain::{Candidate, ClientError};

pub mod farcaster;
pub mod http;
pub mod rpc;

// ============================================================================
// Re-exports
// ============================================================================

pub use farcaster::FarcasterClient;
pub use http::{HttpClient, HttpConfig};
pub use rpc::{RpcClient, TxReceipt};

// ============================================================================
// Identity Provider Contract
// ============================================================================

/// Contract of the identity-search collaborator.
///
/// Implementations resolve a free-text username query to an ordered
/// candidate list; the controller issues lookups from spawned tasks, so
/// the returned future must be `Send`.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Search directory accounts by username prefix.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup fails; the search flow treats
    /// any failure as "no results".
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Candidate>, ClientError>> + Send;
}
