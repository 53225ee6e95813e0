//! Application constants for celopay.
//!
//! Centralizes timing windows, search limits, and confirmation-poll
//! parameters so the search and transfer flows stay consistent.

use std::time::Duration;

// ============================================================================
// Search Constants
// ============================================================================

/// Debounce window applied to search input.
///
/// A lookup is only issued once the query has been stable for this long;
/// every keystroke inside the window cancels and re-arms the timer.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Queries must be longer than this many characters to trigger a lookup.
///
/// Shorter queries clear the candidate list without touching the network.
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum number of candidates requested per directory lookup.
pub const SEARCH_RESULT_LIMIT: usize = 10;

// ============================================================================
// Confirmation Constants
// ============================================================================

/// Interval between transaction-receipt polls.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Maximum number of receipt polls before the watch gives up.
///
/// Together with [`RECEIPT_POLL_INTERVAL`] this bounds the confirmation
/// wait at roughly two minutes; Celo blocks land every few seconds, so
/// hitting the bound almost always means the node lost the transaction.
pub const RECEIPT_POLL_ATTEMPTS: u32 = 60;

// ============================================================================
// Display Constants
// ============================================================================

/// Decimal places used when displaying a native balance.
pub const BALANCE_DISPLAY_DECIMALS: usize = 4;

// ============================================================================
// Tests
// ============================================================================
