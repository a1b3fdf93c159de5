//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rule engine, the character repository, and the
//! renderer so hosts can bubble them up with consistent context.
use grimm_core::{CharacterId, ErrorSeverity, GameError, RuleError};
use thiserror::Error;

use crate::render::RenderError;
use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to render report")]
    Render(#[from] RenderError),

    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rule(err) => err.severity(),
            Self::Repository(_) | Self::Render(_) => ErrorSeverity::Internal,
            Self::CharacterNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rule(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::Render(_) => "RUNTIME_RENDER",
            Self::CharacterNotFound(_) => "RUNTIME_CHARACTER_NOT_FOUND",
        }
    }
}
