use std::env;
use std::time::Duration;

use crate::errors::StartupError;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets Manager name or ARN holding the database credentials.
    pub secret_id: String,
    pub table_name: String,
    pub bind_address: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret_id = get("RDS_SECRET")
            .ok_or_else(|| StartupError::Configuration("RDS_SECRET must be set".to_string()))?;
        let table_name = get("RDS_TABLE_NAME")
            .ok_or_else(|| StartupError::Configuration("RDS_TABLE_NAME must be set".to_string()))?;

        if !is_valid_table_name(&table_name) {
            return Err(StartupError::Configuration(format!(
                "RDS_TABLE_NAME '{}' is not a valid table identifier",
                table_name
            )));
        }

        let bind_address = get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(StartupError::Configuration(format!(
                        "REQUEST_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            secret_id,
            table_name,
            bind_address,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Accepts `table` or `schema.table`, each part a plain SQL identifier.
/// The name ends up in statement text, so nothing else gets through.
pub fn is_valid_table_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return false;
    }
    parts.iter().all(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}
