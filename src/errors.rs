/*!
 * Error types for the rulegate validation engine.
 *
 * This module contains custom error types for the engine and its rule
 * evaluation backends, using the thiserror crate for ergonomic error
 * definitions.
 */

use thiserror::Error;

/// Errors that can occur inside a rule evaluation backend
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// Error when the backend fails to run its rules
    #[error("Rule evaluation failed: {0}")]
    Backend(String),

    /// Any other error surfaced by an adapter
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors that can occur when driving a validation pass
#[derive(Error, Debug)]
pub enum EngineError {
    /// A precondition on the call arguments was violated; nothing was
    /// evaluated and no state was touched
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The evaluation backend failed; surfaced unchanged
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// An asynchronous pass was cancelled before the error mapping was
    /// synchronized
    #[error("Validation was cancelled")]
    Cancelled,
}

impl EngineError {
    /// True if the error is the cooperative cancellation signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
