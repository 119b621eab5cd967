//! Runtime settings sourced from the environment.
//!
//! The API key is a secret and is never taken from the command line; it comes from
//! `BREVO_API_KEY`, optionally loaded from a `.env` file. A missing key is not an
//! error here: the batch pre-flight reports it together with any other missing input.

use std::env;
use std::time::Duration;

use url::Url;

use crate::batch::FixedDelay;

pub const API_KEY_VAR: &str = "BREVO_API_KEY";
pub const ENDPOINT_VAR: &str = "BREVO_SMS_ENDPOINT";
pub const THROTTLE_VAR: &str = "SMS_THROTTLE_MS";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Environment variable has invalid value
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    /// Endpoint override; `None` uses Brevo's public endpoint.
    pub endpoint: Option<String>,
    pub throttle: Duration,
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, SettingsError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).filter(|value| !value.trim().is_empty());

        let endpoint = match lookup(ENDPOINT_VAR).filter(|value| !value.trim().is_empty()) {
            Some(value) => {
                Url::parse(value.trim()).map_err(|err| SettingsError::InvalidValue {
                    var: ENDPOINT_VAR.to_owned(),
                    reason: err.to_string(),
                })?;
                Some(value.trim().to_owned())
            }
            None => None,
        };

        let throttle = match lookup(THROTTLE_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| SettingsError::InvalidValue {
                    var: THROTTLE_VAR.to_owned(),
                    reason: format!("must be a whole number of milliseconds, got: {value}"),
                })?,
            None => FixedDelay::DEFAULT,
        };

        Ok(Self {
            api_key,
            endpoint,
            throttle,
        })
    }
}
