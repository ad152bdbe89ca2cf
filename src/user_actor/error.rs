use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(u64),
    #[error("Email already exists: {0}")]
    AlreadyExists(String),
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    /// Maps a store failure for the user `id` onto the user domain.
    pub fn from_framework(id: Option<u64>, err: FrameworkError) -> Self {
        match (err, id) {
            (FrameworkError::NotFound(_), Some(id)) => UserError::NotFound(id),
            (FrameworkError::Conflict(email), _) => UserError::AlreadyExists(email),
            (FrameworkError::Invalid(msg), _) => UserError::ValidationError(msg),
            (err, _) => UserError::ActorCommunicationError(err.to_string()),
        }
    }
}
