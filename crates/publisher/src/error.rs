use thiserror::Error;

/// Errors raised by publisher implementations.
///
/// These never propagate as command failures; the repository logs and counts
/// them and carries on.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The outbound channel rejected or never acknowledged the message.
    #[error("failed to publish to topic {topic}: {reason}")]
    Unreachable { topic: String, reason: String },
}

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
