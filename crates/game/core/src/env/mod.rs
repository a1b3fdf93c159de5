//! Read-only rule tables.
//!
//! Resolvers look tables up through the [`TablesOracle`] trait so hosts can
//! swap the built-in [`ArmorTierTable`] for data loaded from disk.
mod tables;

pub use tables::{ArmorTier, ArmorTierTable, TablesOracle};
