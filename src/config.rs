//! Environment configuration.
//!
//! Scheduling knobs are read once at startup by [`BookingConfig::from_env`] and fall back
//! to defaults. The payment timeout is different: it has no default and the order sweep
//! reads it again at the start of every run through a [`PaymentTimeoutSource`], so an
//! operator can change it without a restart.

use crate::expiry::ExpiryPolicy;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;

pub const PAYMENT_TIMEOUT_VAR: &str = "PAYMENT_TIMEOUT_MINUTES";
pub const ORDER_SWEEP_INTERVAL_VAR: &str = "ORDER_SWEEP_INTERVAL_SECS";
pub const CLEANUP_SWEEP_INTERVAL_VAR: &str = "CLEANUP_SWEEP_INTERVAL_SECS";
pub const SWEEP_MAX_ATTEMPTS_VAR: &str = "SWEEP_MAX_ATTEMPTS";

const DEFAULT_ORDER_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_CLEANUP_SWEEP_INTERVAL_SECS: u64 = 300;
const DEFAULT_SWEEP_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(String),

    #[error("{var} is not an integer: {value:?}")]
    Invalid { var: String, value: String },

    #[error("{var} must not be negative, got {value}")]
    Negative { var: String, value: i64 },
}

/// Validates a raw payment timeout value (minutes) read from `var`.
pub fn parse_payment_timeout(var: &str, raw: Option<&str>) -> Result<ExpiryPolicy, ConfigError> {
    let raw = raw.ok_or_else(|| ConfigError::Missing(var.to_string()))?;
    let minutes: i64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        value: raw.to_string(),
    })?;
    let minutes = u32::try_from(minutes).map_err(|_| {
        if minutes < 0 {
            ConfigError::Negative {
                var: var.to_string(),
                value: minutes,
            }
        } else {
            ConfigError::Invalid {
                var: var.to_string(),
                value: raw.to_string(),
            }
        }
    })?;
    Ok(ExpiryPolicy::from_minutes(minutes))
}

/// Where the order sweep gets its payment timeout from on each run.
pub trait PaymentTimeoutSource: Send + Sync {
    fn payment_timeout(&self) -> Result<ExpiryPolicy, ConfigError>;
}

/// Reads the timeout from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvPaymentTimeout {
    var: String,
}

impl EnvPaymentTimeout {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvPaymentTimeout {
    fn default() -> Self {
        Self::new(PAYMENT_TIMEOUT_VAR)
    }
}

impl PaymentTimeoutSource for EnvPaymentTimeout {
    fn payment_timeout(&self) -> Result<ExpiryPolicy, ConfigError> {
        let raw = std::env::var(&self.var).ok();
        parse_payment_timeout(&self.var, raw.as_deref())
    }
}

/// In-memory timeout setting. Clones share the same value, so a test (or an admin
/// handle) can change it between sweep runs.
#[derive(Debug, Clone, Default)]
pub struct SharedPaymentTimeout {
    raw: Arc<RwLock<Option<String>>>,
}

impl SharedPaymentTimeout {
    pub fn minutes(minutes: i64) -> Self {
        let source = Self::default();
        source.set(minutes.to_string());
        source
    }

    pub fn set(&self, raw: impl Into<String>) {
        *self.raw.write().unwrap_or_else(|e| e.into_inner()) = Some(raw.into());
    }

    pub fn clear(&self) {
        *self.raw.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl PaymentTimeoutSource for SharedPaymentTimeout {
    fn payment_timeout(&self) -> Result<ExpiryPolicy, ConfigError> {
        let raw = self.raw.read().unwrap_or_else(|e| e.into_inner());
        parse_payment_timeout(PAYMENT_TIMEOUT_VAR, raw.as_deref())
    }
}

/// Startup configuration for the background jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    pub order_sweep_interval: Duration,
    pub cleanup_sweep_interval: Duration,
    /// Total attempts per sweep run, first try included.
    pub sweep_max_attempts: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            order_sweep_interval: Duration::from_secs(DEFAULT_ORDER_SWEEP_INTERVAL_SECS),
            cleanup_sweep_interval: Duration::from_secs(DEFAULT_CLEANUP_SWEEP_INTERVAL_SECS),
            sweep_max_attempts: DEFAULT_SWEEP_MAX_ATTEMPTS,
        }
    }
}

impl BookingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any key lookup. Zero, missing or unparseable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |var: &str| -> Option<u64> {
            lookup(var)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
        };
        Self {
            order_sweep_interval: Duration::from_secs(
                positive(ORDER_SWEEP_INTERVAL_VAR).unwrap_or(DEFAULT_ORDER_SWEEP_INTERVAL_SECS),
            ),
            cleanup_sweep_interval: Duration::from_secs(
                positive(CLEANUP_SWEEP_INTERVAL_VAR)
                    .unwrap_or(DEFAULT_CLEANUP_SWEEP_INTERVAL_SECS),
            ),
            sweep_max_attempts: positive(SWEEP_MAX_ATTEMPTS_VAR)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(DEFAULT_SWEEP_MAX_ATTEMPTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_payment_timeout_parsing() {
        let policy = parse_payment_timeout(PAYMENT_TIMEOUT_VAR, Some(" 15 ")).unwrap();
        assert_eq!(policy, ExpiryPolicy::from_minutes(15));

        assert_eq!(
            parse_payment_timeout(PAYMENT_TIMEOUT_VAR, None),
            Err(ConfigError::Missing(PAYMENT_TIMEOUT_VAR.into()))
        );
        assert!(matches!(
            parse_payment_timeout(PAYMENT_TIMEOUT_VAR, Some("fifteen")),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            parse_payment_timeout(PAYMENT_TIMEOUT_VAR, Some("-5")),
            Err(ConfigError::Negative { value: -5, .. })
        ));
    }

    #[test]
    fn test_env_source_reads_on_every_call() {
        // unique name: tests share the process environment
        let var = "CINEMA_TEST_PAYMENT_TIMEOUT_REREAD";
        let source = EnvPaymentTimeout::new(var);

        assert!(matches!(source.payment_timeout(), Err(ConfigError::Missing(_))));
        std::env::set_var(var, "20");
        assert_eq!(source.payment_timeout(), Ok(ExpiryPolicy::from_minutes(20)));
        std::env::set_var(var, "5");
        assert_eq!(source.payment_timeout(), Ok(ExpiryPolicy::from_minutes(5)));
        std::env::remove_var(var);
    }

    #[test]
    fn test_shared_source() {
        let source = SharedPaymentTimeout::minutes(15);
        let admin = source.clone();

        admin.set("30");
        assert_eq!(source.payment_timeout(), Ok(ExpiryPolicy::from_minutes(30)));
        admin.clear();
        assert!(source.payment_timeout().is_err());
    }

    #[test]
    fn test_booking_config_defaults_and_overrides() {
        assert_eq!(BookingConfig::from_lookup(|_| None), BookingConfig::default());

        let vars: HashMap<&str, &str> = [
            (ORDER_SWEEP_INTERVAL_VAR, "10"),
            (CLEANUP_SWEEP_INTERVAL_VAR, "0"),
            (SWEEP_MAX_ATTEMPTS_VAR, "many"),
        ]
        .into_iter()
        .collect();
        let config = BookingConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.order_sweep_interval, Duration::from_secs(10));
        assert_eq!(config.cleanup_sweep_interval, Duration::from_secs(300));
        assert_eq!(config.sweep_max_attempts, 3);
    }
}
