//! Errors for operations that read through an injected collaborator.

use assess_core::{AssessError, ConfigurationError, ValidationError};
use thiserror::Error;

/// Failure of a lookup that calls an [`AnswerSource`](crate::AnswerSource)
/// or [`ScoreSource`](crate::ScoreSource).
///
/// The collaborator's own error is carried unchanged in `Source`, so the
/// caller decides whether "treat as no data" or "abort" is right.
#[derive(Debug, Error)]
pub enum LookupError<E> {
    /// The engine rejected configuration or input.
    #[error(transparent)]
    Engine(#[from] AssessError),

    /// The injected collaborator failed.
    #[error("data source failed: {0}")]
    Source(#[source] E),
}

impl<E> From<ConfigurationError> for LookupError<E> {
    fn from(err: ConfigurationError) -> Self {
        Self::Engine(err.into())
    }
}

impl<E> From<ValidationError> for LookupError<E> {
    fn from(err: ValidationError) -> Self {
        Self::Engine(err.into())
    }
}

impl<E> LookupError<E> {
    /// The collaborator's error, if that is what failed.
    pub fn source_error(&self) -> Option<&E> {
        match self {
            Self::Source(e) => Some(e),
            Self::Engine(_) => None,
        }
    }
}
