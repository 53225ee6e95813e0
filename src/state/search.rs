//! Debounced, cancelable username search.
//!
//! The controller collapses keystroke bursts into a single directory
//! lookup and guards against out-of-order results:
//!
//! - The debounce timer is a single-slot pending task; every query
//!   change aborts the old timer before arming a new one, so only the
//!   last keystroke inside a window fires.
//! - Lookups are never aborted. Each one is tagged with a monotonically
//!   increasing generation; a result whose generation is no longer the
//!   latest is discarded, so a slow stale lookup cannot overwrite a
//!   newer one.
//!
//! Lookup failures are non-fatal: they are logged, the candidate list
//! is cleared, and nothing reaches the transfer flow.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::AppMessage;
use crate::client::IdentityProvider;
use crate::constants::{MIN_QUERY_LEN, SEARCH_DEBOUNCE, SEARCH_RESULT_LIMIT};
use crate::domain::Candidate;

// ============================================================================
// Search Controller
// ============================================================================

/// Controller for the directory-search flow.
///
/// All mutation happens through [`on_query_change`](Self::on_query_change),
/// [`handle_message`](Self::handle_message), and the selection methods,
/// called from the event loop that owns this value.
#[derive(Debug)]
pub struct SearchController<P: IdentityProvider> {
    provider: Arc<P>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    query: String,
    candidates: Vec<Candidate>,
    selected: Option<Candidate>,
    searching: bool,
    /// Generation of the most recently issued lookup.
    generation: u64,
    debounce: Duration,
    /// Single-slot pending debounce timer; replaced on every keystroke.
    pending_timer: Option<JoinHandle<()>>,
}

impl<P: IdentityProvider> SearchController<P> {
    /// Creates a controller posting to the given message channel.
    #[must_use]
    pub fn new(provider: Arc<P>, message_tx: mpsc::UnboundedSender<AppMessage>) -> Self {
        Self {
            provider,
            message_tx,
            query: String::new(),
            candidates: Vec::new(),
            selected: None,
            searching: false,
            generation: 0,
            debounce: SEARCH_DEBOUNCE,
            pending_timer: None,
        }
    }

    /// Overrides the debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Records a new query and re-arms the debounce timer.
    ///
    /// Any pending timer is canceled and discarded - cancellation, not
    /// queuing. The lookup itself only happens once the window elapses
    /// with the query unchanged.
    pub fn on_query_change(&mut self, query: impl Into<String>) {
        self.query = query.into();

        if let Some(timer) = self.pending_timer.take() {
            timer.abort();
        }

        let message_tx = self.message_tx.clone();
        let query = self.query.clone();
        let debounce = self.debounce;
        self.pending_timer = Some(tokio::spawn(async move {
            sleep(debounce).await;
            let _ = message_tx.send(AppMessage::SearchDebounceElapsed { query });
        }));
    }

    /// Applies a search-related message; other messages are ignored.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::SearchDebounceElapsed { query } => self.on_debounce_elapsed(query),
            AppMessage::SearchCompleted { generation, result } => {
                self.on_search_completed(generation, result);
            }
            _ => {}
        }
    }

    fn on_debounce_elapsed(&mut self, query: String) {
        // A timer can fire while its replacement message is in the
        // queue; only the current query counts.
        if query != self.query {
            return;
        }
        self.pending_timer = None;

        if query.len() <= MIN_QUERY_LEN {
            // Invalidate any lookup still in flight; its result must
            // not repopulate the cleared list.
            self.generation += 1;
            self.candidates.clear();
            self.searching = false;
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        self.searching = true;

        let provider = Arc::clone(&self.provider);
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = provider
                .search(&query, SEARCH_RESULT_LIMIT)
                .await
                .map_err(|e| e.to_string());
            let _ = message_tx.send(AppMessage::SearchCompleted { generation, result });
        });
    }

    fn on_search_completed(&mut self, generation: u64, result: Result<Vec<Candidate>, String>) {
        if generation != self.generation {
            tracing::debug!("discarding stale search result (generation {generation})");
            return;
        }

        // Both outcomes release the flag - it can never stick.
        self.searching = false;
        match result {
            Ok(candidates) => self.candidates = candidates,
            Err(message) => {
                tracing::warn!("user search failed: {message}");
                self.candidates.clear();
            }
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Selects the candidate at `index`, snapshotting it by value.
    ///
    /// The selection persists across later candidate-set refreshes; it
    /// is only replaced by another `select` or cleared explicitly.
    ///
    /// # Returns
    ///
    /// The selected candidate, or `None` if the index is out of range
    /// (in which case the previous selection is kept).
    pub fn select(&mut self, index: usize) -> Option<&Candidate> {
        if let Some(candidate) = self.candidates.get(index) {
            self.selected = Some(candidate.clone());
        }
        self.selected.as_ref()
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current candidate list, in provider order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Whether a lookup is in flight.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Currently selected candidate, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.as_ref()
    }
}
