//! Editor Errors

use serde::{Deserialize, Serialize};

/// Common result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Editor-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum EditorError {
    /// Network, DNS, timeout or a non-success status from the backend
    #[error("Transport failure: {0}")]
    Transport(String),
    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Parse(String),
    /// An operation referenced an ingredient present in neither list
    #[error("Ingredient {0} not found")]
    NotFound(u32),
    /// An operation's precondition was violated
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl EditorError {
    /// True for failures that came from talking to the backend
    pub fn is_remote(&self) -> bool {
        matches!(self, EditorError::Transport(_) | EditorError::Parse(_))
    }
}
