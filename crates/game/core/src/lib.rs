//! Rule engine and data types for Vast Grimm characters.
//!
//! `grimm-core` turns dice outcomes plus character and equipment state into
//! game outcomes: hits and misses, damage, stat changes, table results. It
//! is host-agnostic. Dice display, persistence and messaging are reached
//! through traits, and every resolver in [`rules::RulesEngine`] returns a
//! report together with a single [`CharacterChange`] for the host to commit.
pub mod character;
pub mod config;
pub mod dice;
pub mod env;
pub mod error;
pub mod input;
pub mod modifiers;
pub mod report;
pub mod rules;

pub use character::{
    Abilities, AbilityKind, Character, CharacterChange, CharacterFields, CharacterId, Item, ItemId,
    ItemType, ResourceMeter, TierMeter, WeaponType,
};
pub use config::RulesConfig;
pub use dice::{
    Dice, DiceError, DiceExpression, DiceService, DiceSource, PcgDice, RollContext, RollOutcome,
    RollValue, ScriptedDice,
};
pub use env::{ArmorTier, ArmorTierTable, TablesOracle};
pub use error::{ErrorSeverity, GameError, Resource, RuleError};
pub use input::{
    AttackForm, AttackInput, AttackPrompt, DefendForm, DefendInput, DefendPrompt, Food,
    InputError, InputMemory, RestLength,
};
pub use modifiers::{DrModifier, DrSource};
pub use report::Report;
pub use rules::{Resolution, RulesEngine};
