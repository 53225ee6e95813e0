//! Directory account types.
//!
//! A [`Candidate`] is one account returned by a username search against
//! the Farcaster directory. Candidates are immutable once fetched; a new
//! search replaces the whole set.

use serde::{Deserialize, Serialize};

// ============================================================================
// Candidate
// ============================================================================

/// One directory account matching a username search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable numeric Farcaster id.
    pub fid: u64,
    /// Handle the account is found under (without the leading `@`).
    pub username: String,
    /// Free-form display name.
    pub display_name: String,
    /// Avatar image URL, if the account has one.
    pub pfp_url: Option<String>,
    /// Verified Celo payout addresses, in the order the directory
    /// returned them. May be empty; payments go to the first entry.
    pub verified_addresses: Vec<String>,
}

impl Candidate {
    /// Returns the address a payment to this account would target.
    ///
    /// # Returns
    ///
    /// The first verified address, or `None` if the account has no
    /// verified address and cannot receive a payment.
    #[must_use]
    pub fn payout_address(&self) -> Option<&str> {
        self.verified_addresses.first().map(String::as_str)
    }

    /// Returns `true` if the account can receive a payment.
    #[must_use]
    pub fn has_payout_address(&self) -> bool {
        !self.verified_addresses.is_empty()
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{} ({})", self.username, self.display_name)
    }
}

// ============================================================================
// Tests
// ============================================================================
