//! Rule resolvers.
//!
//! Each resolver reads a character, rolls through the [`DiceService`],
//! awaiting every display before the outcome feeds a later step, and returns
//! a [`Resolution`]: the report plus one [`CharacterChange`] for the host to
//! commit. Resolvers never mutate the character themselves and never produce
//! a partial result alongside an error.
mod ability;
mod combat;
mod powers;
mod progression;
mod tables;

pub use combat::{AttackOutcome, DefendOutcome};
pub use powers::TributeOutcome;
pub use progression::{RestStep, Stat, StatChange, improved_ability, improved_hp_max, rest_plan};
pub use tables::{BrokenOutcome, MoraleOutcome, Reaction};

use crate::character::{Character, CharacterChange};
use crate::config::RulesConfig;
use crate::dice::{DiceService, RollContext, RollOutcome};
use crate::env::TablesOracle;
use crate::error::RuleError;
use crate::report::Report;

/// Result of a resolver: what happened and what to write back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub report: Report,
    pub change: CharacterChange,
}

impl Resolution {
    pub fn new(report: Report, change: CharacterChange) -> Self {
        Self { report, change }
    }

    /// A resolution that leaves the character untouched.
    pub fn report_only(report: Report) -> Self {
        Self::new(report, CharacterChange::new())
    }
}

/// Stateless rule engine over borrowed collaborators.
#[derive(Clone, Copy)]
pub struct RulesEngine<'a> {
    dice: &'a dyn DiceService,
    tables: &'a dyn TablesOracle,
    config: &'a RulesConfig,
}

impl<'a> RulesEngine<'a> {
    pub fn new(
        dice: &'a dyn DiceService,
        tables: &'a dyn TablesOracle,
        config: &'a RulesConfig,
    ) -> Self {
        Self {
            dice,
            tables,
            config,
        }
    }

    pub fn config(&self) -> &'a RulesConfig {
        self.config
    }

    pub fn tables(&self) -> &'a dyn TablesOracle {
        self.tables
    }

    /// Evaluates without displaying.
    fn evaluate(&self, formula: &str, ctx: &RollContext) -> Result<RollOutcome, RuleError> {
        Ok(self.dice.evaluate(formula, ctx)?)
    }

    /// Evaluates and waits for the display to finish.
    async fn roll(&self, formula: &str, ctx: &RollContext) -> Result<RollOutcome, RuleError> {
        let outcome = self.evaluate(formula, ctx)?;
        self.dice.display(&outcome).await;
        Ok(outcome)
    }

    /// Rolls a formula in the character's context.
    async fn roll_for(&self, character: &Character, formula: &str) -> Result<RollOutcome, RuleError> {
        self.roll(formula, &character.roll_context()).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RulesEngine;
    use crate::character::{Abilities, Character, CharacterId, Item, ItemId, WeaponType};
    use crate::config::RulesConfig;
    use crate::dice::{Dice, ScriptedDice};
    use crate::env::ArmorTierTable;

    /// Engine collaborators with scripted faces.
    pub(crate) struct Fixture {
        pub dice: Dice<ScriptedDice>,
        pub tables: ArmorTierTable,
        pub config: RulesConfig,
    }

    impl Fixture {
        pub(crate) fn new(faces: impl IntoIterator<Item = u32>) -> Self {
            Self {
                dice: Dice::new(ScriptedDice::new(faces)),
                tables: ArmorTierTable::default(),
                config: RulesConfig::default(),
            }
        }

        pub(crate) fn engine(&self) -> RulesEngine<'_> {
            RulesEngine::new(&self.dice, &self.tables, &self.config)
        }

        /// Faces left undrawn.
        pub(crate) fn remaining(self) -> usize {
            self.dice
                .into_inner()
                .map(|dice| dice.remaining())
                .unwrap_or_default()
        }
    }

    pub(crate) fn hero() -> Character {
        Character::new(CharacterId(1), "Karg", Abilities::new(2, 1, 0, 1), 10)
            .with_item(Item::weapon(ItemId(1), "Sword", "1d6", WeaponType::Melee).equipped())
            .with_item(Item::weapon(ItemId(2), "Sling", "1d4", WeaponType::Ranged))
    }
}
