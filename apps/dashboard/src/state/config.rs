//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`COMPTOIR_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use comptoir_core::invoice::Issuer;
use comptoir_core::{CURRENCY_CODE, CURRENCY_SYMBOL};
use serde::Serialize;
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Business name (invoice header)
    pub store_name: String,

    /// Address lines (invoice header)
    pub store_address: Vec<String>,

    /// Phone or other contact line (invoice header)
    pub store_contact: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol used in every rendered amount (fixed)
    pub currency_symbol: String,

    /// Explicit session file; `None` means the platform data directory
    #[serde(skip)]
    pub session_path: Option<PathBuf>,

    /// Simulated sign-in latency
    pub login_delay_ms: u64,

    /// Simulated cloud sync latency
    pub sync_delay_ms: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        let issuer = Issuer::default();
        ConfigState {
            store_name: issuer.name,
            store_address: issuer.address_lines,
            store_contact: issuer.contact,
            currency_code: CURRENCY_CODE.to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            session_path: None,
            login_delay_ms: 1000,
            sync_delay_ms: 1500,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `COMPTOIR_STORE_NAME`: Override business name
    /// - `COMPTOIR_STORE_CONTACT`: Override contact line
    /// - `COMPTOIR_SESSION_PATH`: Session file location
    /// - `COMPTOIR_LOGIN_DELAY_MS`: Sign-in delay in milliseconds
    /// - `COMPTOIR_SYNC_DELAY_MS`: Sync delay in milliseconds
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("COMPTOIR_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(contact) = lookup("COMPTOIR_STORE_CONTACT") {
            config.store_contact = contact;
        }

        if let Some(path) = lookup("COMPTOIR_SESSION_PATH") {
            config.session_path = Some(PathBuf::from(path));
        }

        if let Some(ms) = parse_millis(&lookup, "COMPTOIR_LOGIN_DELAY_MS") {
            config.login_delay_ms = ms;
        }

        if let Some(ms) = parse_millis(&lookup, "COMPTOIR_SYNC_DELAY_MS") {
            config.sync_delay_ms = ms;
        }

        config
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn sync_delay(&self) -> Duration {
        Duration::from_millis(self.sync_delay_ms)
    }

    /// Invoice issuer block built from the store fields.
    pub fn issuer(&self) -> Issuer {
        Issuer {
            name: self.store_name.clone(),
            address_lines: self.store_address.clone(),
            contact: self.store_contact.clone(),
        }
    }
}

fn parse_millis<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring invalid duration in environment");
            None
        }
    }
}
