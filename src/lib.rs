//! Celopay - send CELO to Farcaster users.
//!
//! The crate is split into a reusable orchestration core and thin
//! collaborator clients:
//!
//! - [`state`] - the search controller (debounced, cancelable username
//!   lookup) and the transfer orchestrator (precondition checks plus
//!   the submit/confirm lifecycle), both driven by a single-threaded
//!   event loop through [`state::AppMessage`]
//! - [`client`] - the Farcaster directory client and the EVM JSON-RPC
//!   client, plus the [`client::IdentityProvider`] contract
//! - [`wallet`] - the [`wallet::WalletProvider`] contract and a
//!   node-backed implementation
//! - [`domain`] - candidates, networks, exact amount conversion, and
//!   error types
//! - [`config`] - persisted settings with environment overrides

pub mod client;
pub mod config;
pub mod constants;
pub mod domain;
pub mod state;
pub mod wallet;

#[cfg(test)]
mod test_utils;
