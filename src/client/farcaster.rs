//! Farcaster directory client.
//!
//! Username search goes through the Neynar API, which fronts the
//! Farcaster social directory and annotates each account with its
//! verified on-chain addresses.

use serde::Deserialize;

use super::IdentityProvider;
use super::http::{HttpClient, HttpConfig};
use crate::domain::{Candidate, ClientError};

// ============================================================================
// Constants
// ============================================================================

/// Default Neynar API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.neynar.com";

/// User search endpoint path
const SEARCH_PATH: &str = "/v2/farcaster/user/search";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    users: Vec<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    fid: u64,
    username: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    pfp_url: Option<String>,
    #[serde(default)]
    verified_addresses: WireAddresses,
}

#[derive(Debug, Default, Deserialize)]
struct WireAddresses {
    #[serde(default)]
    eth_addresses: Vec<String>,
}

impl From<WireUser> for Candidate {
    fn from(user: WireUser) -> Self {
        let display_name = user.display_name.unwrap_or_else(|| user.username.clone());
        Self {
            fid: user.fid,
            username: user.username,
            display_name,
            pfp_url: user.pfp_url,
            verified_addresses: user.verified_addresses.eth_addresses,
        }
    }
}

// ============================================================================
// Farcaster Client
// ============================================================================

/// Client for the Farcaster directory search API.
#[derive(Debug, Clone)]
pub struct FarcasterClient {
    http: HttpClient,
    base_url: String,
}

impl FarcasterClient {
    /// Create a client authenticated with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::with_config(HttpConfig::with_api_key(api_key)),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (used against local stubs).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search directory accounts by username prefix.
    ///
    /// Results keep the directory's own ordering.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or
    /// an unparseable response body.
    pub async fn search_users(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, ClientError> {
        let url = format!("{}{SEARCH_PATH}", self.base_url);
        let limit = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::api(status.as_u16(), message));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ClientError::parse(format!("user search response: {e}")))?;

        Ok(body.result.users.into_iter().map(Candidate::from).collect())
    }
}

impl IdentityProvider for FarcasterClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, ClientError> {
        self.search_users(query, limit).await
    }
}

// ============================================================================
// Tests
// ============================================================================
