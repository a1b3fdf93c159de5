//! In-memory CharacterRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use grimm_core::{Character, CharacterChange, CharacterId};

use super::{CharacterRepository, RepositoryError, Result};

/// In-memory implementation of CharacterRepository.
pub struct InMemoryCharacterRepo {
    characters: RwLock<HashMap<CharacterId, Character>>,
}

impl InMemoryCharacterRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            characters: RwLock::new(HashMap::new()),
        }
    }

    /// Create with an initial set of characters.
    pub fn with_characters(characters: impl IntoIterator<Item = Character>) -> Self {
        Self {
            characters: RwLock::new(
                characters
                    .into_iter()
                    .map(|character| (character.id, character))
                    .collect(),
            ),
        }
    }

    /// Store a character, replacing any with the same id.
    pub fn insert(&self, character: Character) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters.insert(character.id, character);
        Ok(())
    }

    /// Snapshot of a stored character.
    pub fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(characters.get(&id).cloned())
    }
}

impl Default for InMemoryCharacterRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepo {
    async fn load(&self, id: CharacterId) -> Result<Option<Character>> {
        self.get(id)
    }

    async fn update(&self, id: CharacterId, change: &CharacterChange) -> Result<Character> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let character = characters
            .get_mut(&id)
            .ok_or(RepositoryError::Missing(id))?;
        change.apply(character);
        Ok(character.clone())
    }
}

#[cfg(test)]
mod tests {
    use grimm_core::{Abilities, AbilityKind};

    use super::*;

    #[tokio::test]
    async fn update_applies_the_change() {
        let repo = InMemoryCharacterRepo::with_characters([Character::new(
            CharacterId(3),
            "Nohr",
            Abilities::default(),
            5,
        )]);
        let change = CharacterChange::new()
            .with_ability(AbilityKind::Presence, 2)
            .with_hp_value(1);

        let updated = repo.update(CharacterId(3), &change).await.unwrap();
        assert_eq!(updated.abilities.presence, 2);
        assert_eq!(updated.hp.value, 1);
        assert_eq!(repo.load(CharacterId(3)).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_of_unknown_character_fails() {
        let repo = InMemoryCharacterRepo::new();
        let err = repo
            .update(CharacterId(9), &CharacterChange::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Missing(CharacterId(9))));
    }
}
