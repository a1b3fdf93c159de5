//! Rest and advancement.
mod improve;
mod rest;

pub use improve::{Stat, StatChange, improved_ability, improved_hp_max};
pub use rest::{RestStep, rest_plan};
