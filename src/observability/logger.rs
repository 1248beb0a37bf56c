//! Log subscriber installation
//!
//! Logs are JSON lines on stderr so that stdout stays reserved for command
//! output. The filter comes from `ORDERLY_LOG`, then the config file, then
//! the `warn` default.

use std::io;

use tracing_subscriber::EnvFilter;

use super::{ObservabilityError, ObservabilityResult};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "ORDERLY_LOG";

/// Filter used when neither the environment nor the config sets one
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the effective filter directive
pub fn resolve_filter(env: Option<&str>, configured: Option<&str>) -> String {
    env.filter(|s| !s.trim().is_empty())
        .or(configured.filter(|s| !s.trim().is_empty()))
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global JSON subscriber
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_logging(configured: Option<&str>) -> ObservabilityResult<()> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = resolve_filter(env.as_deref(), configured);
    let filter = EnvFilter::try_new(&directive).map_err(|e| {
        ObservabilityError::new(format!("invalid log filter '{}': {}", directive, e))
    })?;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ObservabilityError::new(format!("cannot install log subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_filter_precedence() {
        assert_eq!(resolve_filter(None, None), "warn");
        assert_eq!(resolve_filter(None, Some("info")), "info");
        assert_eq!(resolve_filter(Some("debug"), Some("info")), "debug");
        assert_eq!(resolve_filter(Some("  "), Some("info")), "info");
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let err = init_logging(Some("orderly=notalevel")).unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }
}
