use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while loading checkout, offer or upsell configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Could not read configuration file '{path}': {message}")]
    FileError { path: String, message: String },
}

/// Errors raised by the block editing surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockEditError {
    #[error("Block '{type_name}' at index {index} is a system block and cannot be deleted")]
    SystemBlockNotDeletable { index: usize, type_name: String },

    #[error("Block index {index} is out of range for a list of {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Caller-contract violations of the upsell flow state machine.
///
/// These indicate an integration bug in the host and are never produced by
/// bad runtime data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Upsell flow has already been started")]
    AlreadyStarted,

    #[error("Cannot {action} an upsell before the flow is started")]
    NotStarted { action: &'static str },

    #[error("Cannot {action} an upsell after the flow has completed")]
    AlreadyCompleted { action: &'static str },

    #[error("Accepted item belongs to upsell {got}, but upsell {expected} is showing")]
    UpsellMismatch { expected: Uuid, got: Uuid },

    #[error("Upsell session must be built inside a Tokio runtime or given a runtime handle")]
    NoRuntime,
}

/// Failures reported by the injected side-effect collaborators.
#[derive(Error, Debug, Clone)]
pub enum ReporterError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Collaborator is unavailable: {0}")]
    Unavailable(String),
}
