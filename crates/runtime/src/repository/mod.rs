//! Character persistence.
//!
//! The runtime never writes a character directly. Every operation ends with
//! one [`CharacterRepository::update`] carrying the resolver's change.
mod error;
mod memory;

pub use error::RepositoryError;
pub use memory::InMemoryCharacterRepo;

use async_trait::async_trait;
use grimm_core::{Character, CharacterChange, CharacterId};

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Repository for character sheets.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Load a character by id; `None` if it does not exist.
    async fn load(&self, id: CharacterId) -> Result<Option<Character>>;

    /// Commit a change and return the updated character.
    async fn update(&self, id: CharacterId, change: &CharacterChange) -> Result<Character>;
}
