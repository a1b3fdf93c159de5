use crate::character::Character;
use crate::dice::{RollContext, RollValue};
use crate::error::RuleError;
use crate::input::{DefendInput, DefendPrompt, InputMemory};
use crate::modifiers;
use crate::report::{DefendReport, ItemRef, Report};
use crate::rules::{Resolution, RulesEngine};

use super::reduced_damage;

/// Outcome of a defence roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DefendOutcome {
    /// Natural 20; succeeds whatever the DR.
    CriticalSuccess,
    Dodge,
    /// Natural 1 that failed; incoming damage is doubled.
    Fumble,
    Hit,
}

impl DefendOutcome {
    pub fn classify(total: i32, defend_dr: i32, is_crit: bool, is_fumble: bool) -> Self {
        if is_crit {
            Self::CriticalSuccess
        } else if total >= defend_dr {
            Self::Dodge
        } else if is_fumble {
            Self::Fumble
        } else {
            Self::Hit
        }
    }

    pub const fn takes_damage(self) -> bool {
        matches!(self, Self::Fumble | Self::Hit)
    }

    pub const fn label_key(self) -> &'static str {
        match self {
            Self::CriticalSuccess => "defend.critical",
            Self::Dodge => "defend.dodge",
            Self::Fumble => "defend.fumble",
            Self::Hit => "defend.hit",
        }
    }
}

impl RulesEngine<'_> {
    /// Prefilled defend form for a character.
    pub fn defend_prompt(
        &self,
        character: &Character,
        memory: &InputMemory,
    ) -> Result<DefendPrompt, RuleError> {
        let dr_modifiers = modifiers::defend_modifiers(character, self.config, self.tables)?;
        Ok(DefendPrompt::new(memory, dr_modifiers, self.config))
    }

    /// Defends against an incoming attack.
    ///
    /// The roll is compared against the modified DR. On a failure the
    /// incoming formula is rolled (doubled on a fumble) and reduced by the
    /// active armor and helmet. The damage is reported, not applied.
    pub async fn defend(
        &self,
        character: &Character,
        input: &DefendInput,
    ) -> Result<Resolution, RuleError> {
        let reduction = modifiers::damage_reduction_formula(character, self.tables)?;
        let defend_roll = self
            .roll_for(character, "d20+@abilities.agility.value")
            .await?;
        let outcome = DefendOutcome::classify(
            defend_roll.total,
            input.modified_dr,
            defend_roll.is_crit(),
            defend_roll.is_fumble(),
        );

        let mut damage_roll = None;
        let mut armor_roll = None;
        let mut damage = None;
        let mut items = Vec::new();
        if outcome.takes_damage() {
            let formula = match outcome {
                DefendOutcome::Fumble => "@incoming * 2",
                _ => "@incoming",
            };
            let incoming = RollContext::with(
                "incoming",
                RollValue::formula(input.incoming_attack.as_str()),
            );
            let rolled = self.evaluate(formula, &incoming)?;
            let armor = match &reduction {
                Some(die) => {
                    let ctx = RollContext::with("die", RollValue::formula(die.as_str()));
                    Some(self.evaluate("@die", &ctx)?)
                }
                None => None,
            };
            self.dice.display_both(&rolled, armor.as_ref()).await;

            items = character
                .equipped_armor()
                .into_iter()
                .chain(character.equipped_helmet())
                .map(|item| ItemRef {
                    id: item.id,
                    name: item.name.clone(),
                })
                .collect();
            damage = Some(reduced_damage(
                rolled.total,
                armor.as_ref().map(|roll| roll.total),
            ));
            damage_roll = Some(rolled);
            armor_roll = armor;
        }

        Ok(Resolution::report_only(Report::Defend(DefendReport {
            defend_dr: input.modified_dr,
            defend_roll,
            outcome,
            damage_roll,
            armor_roll,
            items,
            damage,
        })))
    }
}
