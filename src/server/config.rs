use std::str::FromStr;

use crate::server::error::config::ConfigError;

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    pub policy: PolicyConfig,
}

/// Tunable business rules handed to each service on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Lifetime of a visitor account when the caller does not pick one
    pub visitor_default_duration_days: i64,
    /// Length of the TRIAL subscription auto-provisioned on the FREE plan
    pub trial_duration_days: i64,
    /// Visitors expiring within this many days are notified by the scheduler
    pub visitor_expiry_notice_days: i64,
    /// Digits in a generated temporary password
    pub temporary_password_length: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            visitor_default_duration_days: 30,
            trial_duration_days: 365,
            visitor_expiry_notice_days: 7,
            temporary_password_length: 8,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = PolicyConfig::default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            policy: PolicyConfig {
                visitor_default_duration_days: parse_or(
                    "VISITOR_DEFAULT_DURATION_DAYS",
                    defaults.visitor_default_duration_days,
                )?,
                trial_duration_days: parse_or("TRIAL_DURATION_DAYS", defaults.trial_duration_days)?,
                visitor_expiry_notice_days: parse_or(
                    "VISITOR_EXPIRY_NOTICE_DAYS",
                    defaults.visitor_expiry_notice_days,
                )?,
                temporary_password_length: parse_or(
                    "TEMPORARY_PASSWORD_LENGTH",
                    defaults.temporary_password_length,
                )?,
            },
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn parse_or<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value.parse::<T>().map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
