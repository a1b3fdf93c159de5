//! Content factory for loading rule data from a data directory.

use std::path::{Path, PathBuf};

use grimm_core::{ArmorTierTable, Character, RulesConfig};

use crate::loaders::{CharacterLoader, ConfigLoader, LoadResult, TablesLoader};

/// Content factory that loads rule data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── armor_tiers.ron
/// └── characters/
///     └── karg.ron
/// ```
///
/// Missing `rules.toml` or `armor_tiers.ron` fall back to the embedded
/// defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load rule settings from `rules.toml`.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::parse(crate::DEFAULT_RULES)
        }
    }

    /// Load the armor tier table from `armor_tiers.ron`.
    pub fn load_tables(&self) -> LoadResult<ArmorTierTable> {
        let path = self.data_dir.join("armor_tiers.ron");
        if path.exists() {
            TablesLoader::load(&path)
        } else {
            TablesLoader::parse(crate::DEFAULT_ARMOR_TIERS)
        }
    }

    /// Path of a named character sheet.
    pub fn character_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("characters").join(format!("{name}.ron"))
    }

    /// Load a named character from `characters/<name>.ron`.
    pub fn load_character(&self, name: &str) -> LoadResult<Character> {
        CharacterLoader::load(&self.character_path(name))
    }

    /// Save a character to `characters/<name>.ron`.
    pub fn save_character(&self, name: &str, character: &Character) -> LoadResult<()> {
        CharacterLoader::save(&self.character_path(name), character)
    }
}
