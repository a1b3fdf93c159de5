//! Content loaders for reading rule data from files.

pub mod character;
pub mod config;
pub mod factory;
pub mod memory;
pub mod tables;

pub use character::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use memory::InputMemoryLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Helper function to write file contents, creating parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> LoadResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", parent.display(), e))?;
    }
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
}
