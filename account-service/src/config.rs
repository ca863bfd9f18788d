//! Configuration for the account service

use std::env;

use common::error::{Error, Result};

/// Default collection holding profile documents
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Collection holding one profile document per identity
    pub users_collection: String,
    /// Delete the identity account when its profile write fails
    pub compensate_failed_registration: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            users_collection: DEFAULT_USERS_COLLECTION.to_string(),
            compensate_failed_registration: false,
        }
    }
}

impl AccountServiceConfig {
    /// Create a new configuration from `USERS_COLLECTION` and
    /// `COMPENSATE_FAILED_REGISTRATION`
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            env::var("USERS_COLLECTION").ok().as_deref(),
            env::var("COMPENSATE_FAILED_REGISTRATION").ok().as_deref(),
        )
    }

    /// Build a configuration from raw setting values; unset or blank values
    /// fall back to the defaults
    pub fn from_values(users_collection: Option<&str>, compensate: Option<&str>) -> Result<Self> {
        let defaults = Self::default();

        let users_collection = users_collection
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.users_collection);

        let compensate_failed_registration = match compensate.map(|v| v.trim().to_ascii_lowercase()) {
            None => defaults.compensate_failed_registration,
            Some(v) if v.is_empty() => defaults.compensate_failed_registration,
            Some(v) if v == "true" || v == "1" => true,
            Some(v) if v == "false" || v == "0" => false,
            Some(v) => {
                return Err(Error::ConfigurationError(format!(
                    "COMPENSATE_FAILED_REGISTRATION must be true/false/1/0, got {:?}",
                    v
                )));
            }
        };

        Ok(Self {
            users_collection,
            compensate_failed_registration,
        })
    }

    /// Create a new configuration with custom values
    pub fn new(users_collection: impl Into<String>, compensate_failed_registration: bool) -> Self {
        Self {
            users_collection: users_collection.into(),
            compensate_failed_registration,
        }
    }
}
