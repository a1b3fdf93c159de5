//! CLI configuration read from the process environment.
use std::env;
use std::path::{Path, PathBuf};

use grimm_core::CharacterId;

use crate::dirs;

/// Configuration required to run one command.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub character_file: Option<PathBuf>,
    pub tables_file: Option<PathBuf>,
    pub rules_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub display_delay_ms: u64,
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GRIMM_CHARACTER_FILE` - Character sheet (default: `character.ron` in the data directory)
    /// - `GRIMM_TABLES_FILE` - Armor tier table RON (default: printed table)
    /// - `GRIMM_RULES_FILE` - Rule settings TOML (default: printed rules)
    /// - `GRIMM_SEED` - Dice seed (default: OS entropy)
    /// - `GRIMM_DISPLAY_DELAY_MS` - Pause after each displayed roll (default: 0)
    /// - `GRIMM_LOG_DIR` - Log directory (default: platform cache directory)
    pub fn from_env() -> Self {
        Self {
            character_file: read_path("GRIMM_CHARACTER_FILE"),
            tables_file: read_path("GRIMM_TABLES_FILE"),
            rules_file: read_path("GRIMM_RULES_FILE"),
            seed: read_env::<u64>("GRIMM_SEED"),
            display_delay_ms: read_env::<u64>("GRIMM_DISPLAY_DELAY_MS").unwrap_or(0),
            log_dir: read_path("GRIMM_LOG_DIR"),
        }
    }

    pub fn character_file(&self) -> PathBuf {
        self.character_file
            .clone()
            .unwrap_or_else(|| dirs::data_dir().join("character.ron"))
    }

    /// Remembered form inputs for one character, kept beside the sheet.
    pub fn input_memory_file(&self, id: CharacterId) -> PathBuf {
        let sheet = self.character_file();
        let dir = sheet.parent().map(Path::to_path_buf).unwrap_or_default();
        dir.join(format!("inputs-{}.ron", id.0))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(dirs::log_dir)
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_memory_sits_beside_the_sheet() {
        let config = CliConfig {
            character_file: Some(PathBuf::from("/srv/grimm/karg.ron")),
            ..CliConfig::default()
        };
        assert_eq!(
            config.input_memory_file(CharacterId(7)),
            PathBuf::from("/srv/grimm/inputs-7.ron")
        );
    }
}
