//! Error types for the gift exchange
//!
//! Orchestration code uses anyhow for consistent error handling; the typed
//! variants below are what callers downcast to when they need to react to a
//! specific condition.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific exchange scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("Need at least 2 participants, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("Too many participants for {code_length}-letter codes: {count} (at most {max})")]
    TooManyParticipants {
        count: usize,
        max: usize,
        code_length: usize,
    },

    #[error("Participant names must not be empty")]
    EmptyParticipantName,

    #[error("Duplicate participant name detected: {name}")]
    DuplicateParticipant { name: String },

    #[error("Giver and receiver in an illegal pair must be different people: {name}")]
    SelfExclusion { name: String },

    #[error("Constraint references unknown participant: {giver} → {receiver}")]
    UnknownParticipant { giver: String, receiver: String },

    #[error("Invalid identifier {identifier:?}: {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Identifier already exists: {identifier}")]
    IdentifierTaken { identifier: String },

    #[error("Exchange not found: {identifier}")]
    ExchangeNotFound { identifier: String },

    #[error("Participant not found in this exchange: {name}")]
    ParticipantNotFound { name: String },

    #[error("Could not find a valid gift assignment with the given constraints: {reason}")]
    InfeasibleConstraints { reason: String },

    #[error("Only a degraded assignment could be produced; try removing some forbidden pairs")]
    DegradedAssignmentRejected,

    #[error("Invalid assignment: {reason}")]
    InvalidAssignment { reason: String },

    #[error("Invalid description: {reason}")]
    InvalidDescription { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
