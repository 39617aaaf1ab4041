//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PostboardError`] via `#[from]`.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum PostboardError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    #[error(transparent)]
    PageOutOfRange(#[from] PageOutOfRangeError),

    #[error("event error: {0}")]
    Event(#[from] EventError),

    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations and malformed caller input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// A looked-up record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A record with the same natural key already exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} already exists: {key}")]
pub struct AlreadyExistsError {
    pub entity: &'static str,
    pub key: String,
}

/// The requested page lies beyond the last page of the collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} does not exist for current page {current_page}")]
pub struct PageOutOfRangeError {
    pub entity: &'static str,
    pub current_page: u32,
    pub total_pages: u64,
}

/// Failures of the publish/subscribe core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("invalid event structure")]
    InvalidEventStructure,

    #[error("topic {0} does not exist")]
    TopicNotFound(String),

    #[error("subscriber of {topic} failed: {message}")]
    Handler { topic: String, message: String },

    #[error("topic {topic} received an unexpected payload")]
    UnexpectedPayload { topic: String },

    #[error("topic {topic} has asynchronous subscribers but no runtime is available")]
    RuntimeUnavailable { topic: String },
}
