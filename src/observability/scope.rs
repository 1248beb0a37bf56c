//! ObservationScope for begin/complete logging
//!
//! - `{NAME}_BEGIN` on creation
//! - `{NAME}_COMPLETE` on `complete()`, with elapsed milliseconds
//! - `{NAME}_FAILED` on `fail()`
//! - `{NAME}_ERROR` on drop when neither was called

use std::time::Instant;

use tracing::{error, info, warn};

/// A scope that logs its own start and end
///
/// ```ignore
/// let scope = ObservationScope::new("REFORMAT");
/// // ... do work ...
/// scope.complete();
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: bool,
    started: Instant,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        info!(event = %format!("{}_BEGIN", name));
        Self {
            name,
            completed: false,
            started: Instant::now(),
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(mut self) {
        self.completed = true;
        info!(
            event = %format!("{}_COMPLETE", self.name),
            elapsed_ms = self.elapsed_ms()
        );
    }

    /// Mark the scope as failed with a reason
    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        error!(event = %format!("{}_FAILED", self.name), reason);
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            warn!(
                event = %format!("{}_ERROR", self.name),
                reason = "scope dropped without completion"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_creation() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_completed());
        scope.complete();
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }
}
