//! Rule settings loader.

use std::path::Path;

use grimm_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule settings from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rule settings from a TOML file.
    ///
    /// Keys missing from the file keep their printed defaults.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse rule settings from TOML text.
    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_rules_match_printed_defaults() {
        let config = ConfigLoader::parse(crate::DEFAULT_RULES).unwrap();
        assert_eq!(config, RulesConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("tribute_dr = 14\n").unwrap();
        assert_eq!(config.tribute_dr, 14);
        assert_eq!(config.default_incoming_attack, "1d4");
    }

    #[test]
    fn parse_error_is_reported() {
        let err = ConfigLoader::parse("tribute_dr = \"high\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse rules TOML"));
    }
}
