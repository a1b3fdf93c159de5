//! Armor tier table loader.

use std::path::Path;

use grimm_core::ArmorTierTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for armor tier tables from RON files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load an armor tier table from a RON file.
    pub fn load(path: &Path) -> LoadResult<ArmorTierTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an armor tier table from RON text.
    pub fn parse(content: &str) -> LoadResult<ArmorTierTable> {
        let table: ArmorTierTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse armor tier RON: {}", e))?;
        if table.is_empty() {
            anyhow::bail!("Armor tier table is empty");
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_table_matches_printed_tiers() {
        let table = TablesLoader::parse(crate::DEFAULT_ARMOR_TIERS).unwrap();
        assert_eq!(table, ArmorTierTable::default());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(TablesLoader::parse("{}").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = TablesLoader::load(Path::new("/nonexistent/armor.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/armor.ron"));
    }
}
