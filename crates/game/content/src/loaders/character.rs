//! Character sheet loader.

use std::path::Path;

use grimm_core::Character;
use ron::ser::PrettyConfig;

use crate::loaders::{LoadResult, read_file, write_file};

/// Loads and saves character sheets as RON.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character sheet from a RON file.
    pub fn load(path: &Path) -> LoadResult<Character> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a character sheet from RON text.
    pub fn parse(content: &str) -> LoadResult<Character> {
        let character: Character = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character RON: {}", e))?;

        Ok(character)
    }

    /// Save a character sheet as pretty-printed RON.
    pub fn save(path: &Path, character: &Character) -> LoadResult<()> {
        let content = ron::ser::to_string_pretty(character, PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize character: {}", e))?;
        write_file(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use grimm_core::{AbilityKind, ItemType};

    use super::*;

    #[test]
    fn sample_character_parses() {
        let character = CharacterLoader::parse(crate::SAMPLE_CHARACTER).unwrap();
        assert_eq!(character.name, "Karg");
        assert_eq!(character.ability(AbilityKind::Strength), 2);
        assert!(character.first_equipped(ItemType::Armor).is_some());
        assert!(character.class_item().is_some());
    }

    #[test]
    fn out_of_range_ability_is_rejected() {
        let sheet = crate::SAMPLE_CHARACTER.replace("strength: 2", "strength: 9");
        let err = CharacterLoader::parse(&sheet).unwrap_err();
        assert!(err.to_string().contains("strength score 9 is outside [-3, 6]"));
    }

    #[test]
    fn save_then_load_preserves_the_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheets").join("karg.ron");
        let mut character = CharacterLoader::parse(crate::SAMPLE_CHARACTER).unwrap();
        character.hp.value = 3;

        CharacterLoader::save(&path, &character).unwrap();
        let loaded = CharacterLoader::load(&path).unwrap();
        assert_eq!(loaded, character);
    }
}
