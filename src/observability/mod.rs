//! Observability for the command layer
//!
//! Library code logs pipeline stages at `debug` through `tracing`; the CLI
//! installs a JSON subscriber on stderr and wraps each command in an
//! `ObservationScope`.
//!
//! ```ignore
//! init_logging(config.log_filter.as_deref())?;
//! let scope = ObservationScope::new("REFORMAT");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{init_logging, resolve_filter, DEFAULT_FILTER, LOG_ENV};
pub use scope::ObservationScope;

use thiserror::Error;
use tracing::{info, warn};

/// Logging could not be set up
///
/// Never fatal: a command runs without logs rather than not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[ERROR] ORDERLY_OBSERVABILITY_FAILED: {message}")]
pub struct ObservabilityError {
    message: String,
}

impl ObservabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        "ORDERLY_OBSERVABILITY_FAILED"
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        false
    }
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

/// Log a named event with a short detail
pub fn log_event(event: Event, detail: &str) {
    if event.is_failure() {
        warn!(event = event.as_str(), detail);
    } else {
        info!(event = event.as_str(), detail);
    }
}
