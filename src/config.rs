//! Application configuration with persistence.
//!
//! This module provides the [`Settings`] structure for managing
//! application settings with automatic load/save to disk and
//! environment-variable overrides.
//!
//! # Configuration File Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/celopay/config.json`
//! - macOS: `~/Library/Application Support/celopay/config.json`
//! - Windows: `%APPDATA%/celopay/config.json`
//!
//! # Environment Overrides
//!
//! - `NEYNAR_API_KEY` - directory API key
//! - `CELOPAY_RPC_URL` - JSON-RPC endpoint override
//! - `CELOPAY_ACCOUNT` - sending account address
//!
//! Empty environment values are treated as unset.

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::domain::{ChainNetwork, ClientError};

// ============================================================================
// Constants
// ============================================================================

/// Application name used for the configuration directory.
const APP_NAME: &str = "celopay";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// Settings
// ============================================================================

/// Application configuration structure for persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// The required network payments are sent on.
    #[serde(default)]
    pub network: ChainNetwork,
    /// Address of the node-managed sending account.
    #[serde(default)]
    pub account: Option<String>,
    /// JSON-RPC endpoint override; the network default is used when unset.
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Neynar directory API key.
    #[serde(default)]
    pub neynar_api_key: Option<String>,
}

impl Settings {
    /// Returns the path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be
    /// determined or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from disk with environment overrides
    /// applied on top.
    ///
    /// If the configuration file doesn't exist or cannot be parsed,
    /// the defaults are used.
    #[must_use]
    pub fn load() -> Self {
        let settings = match Self::try_load() {
            Ok(settings) => settings,
            Err(err) => {
                tracing::debug!("config load failed, using defaults: {err}");
                Self::default()
            }
        };
        settings.with_env_overrides()
    }

    /// Attempts to load the configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined, the file
    /// cannot be read, or the JSON content cannot be parsed.
    pub fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        let content = fs::read_to_string(&path)?;
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Saves the configuration to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file
    /// cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Applies environment-variable overrides, ignoring empty values.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_non_empty("NEYNAR_API_KEY") {
            self.neynar_api_key = Some(key);
        }
        if let Some(url) = env_non_empty("CELOPAY_RPC_URL") {
            self.rpc_url = Some(url);
        }
        if let Some(account) = env_non_empty("CELOPAY_ACCOUNT") {
            self.account = Some(account);
        }
        self
    }

    /// The JSON-RPC endpoint to use: the override, or the network default.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network.rpc_url().to_string())
    }

    /// The directory API key, required for any search.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no key is set.
    pub fn api_key(&self) -> Result<&str, ClientError> {
        self.neynar_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ClientError::Config(
                    "no directory API key; set NEYNAR_API_KEY or add neynar_api_key to the config file".to_string(),
                )
            })
    }

    /// The sending account address, required for any wallet operation.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no account is set.
    pub fn sender(&self) -> Result<&str, ClientError> {
        self.account
            .as_deref()
            .filter(|account| !account.trim().is_empty())
            .ok_or_else(|| {
                ClientError::Config(
                    "no sending account; set CELOPAY_ACCOUNT or add account to the config file"
                        .to_string(),
                )
            })
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

// ============================================================================
// Tests
// ============================================================================
