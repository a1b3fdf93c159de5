//! Last-used form inputs, kept per character between sessions.

use std::path::Path;

use grimm_core::InputMemory;
use ron::ser::PrettyConfig;

use crate::loaders::{LoadResult, read_file, write_file};

/// Loads and saves [`InputMemory`] as RON.
pub struct InputMemoryLoader;

impl InputMemoryLoader {
    /// Load remembered inputs; a missing file means nothing is remembered yet.
    pub fn load(path: &Path) -> LoadResult<InputMemory> {
        if !path.exists() {
            return Ok(InputMemory::new());
        }
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<InputMemory> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse input memory RON: {}", e))
    }

    pub fn save(path: &Path, memory: &InputMemory) -> LoadResult<()> {
        let content = ron::ser::to_string_pretty(memory, PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize input memory: {}", e))?;
        write_file(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_remembers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let memory = InputMemoryLoader::load(&dir.path().join("inputs-1.ron")).unwrap();
        assert_eq!(memory, InputMemory::new());
    }

    #[test]
    fn saved_inputs_come_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs-1.ron");
        let memory = InputMemory {
            attack_dr: Some(14),
            target_armor: Some("1d4".into()),
            defend_dr: Some(10),
            incoming_attack: Some("1d6+1".into()),
        };

        InputMemoryLoader::save(&path, &memory).unwrap();
        assert_eq!(InputMemoryLoader::load(&path).unwrap(), memory);
    }

    #[test]
    fn partial_file_fills_the_rest_with_defaults() {
        let memory = InputMemoryLoader::parse("(attack_dr: Some(8))").unwrap();
        assert_eq!(memory.attack_dr, Some(8));
        assert_eq!(memory.incoming_attack, None);
    }
}
