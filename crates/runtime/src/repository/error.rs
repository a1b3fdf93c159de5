//! Error types raised by repository implementations.

use grimm_core::CharacterId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("character repository lock was poisoned")]
    LockPoisoned,

    #[error("no stored character {0}")]
    Missing(CharacterId),
}
