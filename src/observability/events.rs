//! Named events emitted by the command layer

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file read and validated
    ConfigLoaded,
    /// Schema text turned into a checked tree
    SchemaCompiled,
    /// Schema text failed to compile
    SchemaRejected,
    /// Instance conforms to the schema
    InstanceValid,
    /// Instance violates the schema
    InstanceInvalid,
    /// Standard input exceeded the configured limit
    InputTooLarge,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaCompiled => "SCHEMA_COMPILED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::InstanceValid => "INSTANCE_VALID",
            Event::InstanceInvalid => "INSTANCE_INVALID",
            Event::InputTooLarge => "INPUT_TOO_LARGE",
        }
    }

    /// Events that end the command with a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::SchemaRejected | Event::InstanceInvalid | Event::InputTooLarge
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
