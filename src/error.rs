use thiserror::Error;

/// Errors surfaced by the wellness core.
///
/// Only caller input can fail here; an ignored tap in the concentration game
/// is reported through [`crate::concentration::SignalOutcome`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MindWellError {
    #[error("validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, MindWellError>;
