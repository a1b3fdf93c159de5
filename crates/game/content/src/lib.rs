//! Data files and loaders for rule tables, rule settings, and characters.
//!
//! Four kinds of files are understood:
//! - Armor tier tables (RON)
//! - Rule settings (TOML)
//! - Character sheets (RON, loaded and saved)
//! - Last-used form inputs per character (RON, loaded and saved)
//!
//! Loaders use grimm-core types directly with serde for RON/TOML
//! (de)serialization. The printed defaults ship in `data/` and are embedded
//! in the crate, so a host works without any file on disk.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, ConfigLoader, ContentFactory, InputMemoryLoader, LoadResult, TablesLoader,
};

/// Printed armor tier table, as shipped in `data/armor_tiers.ron`.
pub const DEFAULT_ARMOR_TIERS: &str = include_str!("../data/armor_tiers.ron");

/// Printed rule settings, as shipped in `data/rules.toml`.
pub const DEFAULT_RULES: &str = include_str!("../data/rules.toml");

/// Sample character, as shipped in `data/characters/karg.ron`.
pub const SAMPLE_CHARACTER: &str = include_str!("../data/characters/karg.ron");
