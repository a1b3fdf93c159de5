//! Structured results of resolved actions.
//!
//! Reports carry every roll and decision of an action but no prose; hosts
//! turn them into chat cards through a renderer and a localizer.

use crate::character::{AbilityKind, ItemId, WeaponType};
use crate::dice::RollOutcome;
use crate::input::{Food, RestLength};
use crate::modifiers::DrModifier;
use crate::rules::{
    AttackOutcome, BrokenOutcome, DefendOutcome, MoraleOutcome, Reaction, StatChange,
    TributeOutcome,
};

/// A resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Report {
    AbilityTest(AbilityTestReport),
    Attack(AttackReport),
    Defend(DefendReport),
    Morale(MoraleReport),
    Reaction(ReactionReport),
    Tribute(TributeReport),
    /// Single roll with a title and an effect (skills, omens, daily points).
    Outcome(OutcomeReport),
    Rest(RestReport),
    Improve(ImproveReport),
    Broken(BrokenReport),
}

impl Report {
    /// Every roll in the report, in the order it was made.
    pub fn rolls(&self) -> Vec<&RollOutcome> {
        match self {
            Self::AbilityTest(report) => vec![&report.roll],
            Self::Attack(report) => std::iter::once(&report.attack_roll)
                .chain(report.damage_roll.as_ref())
                .chain(report.target_armor_roll.as_ref())
                .collect(),
            Self::Defend(report) => std::iter::once(&report.defend_roll)
                .chain(report.damage_roll.as_ref())
                .chain(report.armor_roll.as_ref())
                .collect(),
            Self::Morale(report) => std::iter::once(&report.morale_roll)
                .chain(report.outcome_roll.as_ref())
                .collect(),
            Self::Reaction(report) => vec![&report.roll],
            Self::Tribute(report) => std::iter::once(&report.roll)
                .chain(report.damage_roll.as_ref())
                .collect(),
            Self::Outcome(report) => report.roll.iter().collect(),
            Self::Rest(report) => report
                .steps
                .iter()
                .filter_map(|step| step.roll.as_ref())
                .collect(),
            Self::Improve(report) => report.rolls.iter().collect(),
            Self::Broken(report) => std::iter::once(&report.roll)
                .chain(report.additional_rolls.iter())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityTestReport {
    pub ability: AbilityKind,
    pub roll: RollOutcome,
    /// DR adjustments the player should apply to the test.
    pub dr_modifiers: Vec<DrModifier>,
}

/// Item named on a report card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRef {
    pub id: ItemId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub weapon: ItemRef,
    pub weapon_type: WeaponType,
    pub attack_dr: i32,
    pub attack_roll: RollOutcome,
    pub outcome: AttackOutcome,
    pub damage_roll: Option<RollOutcome>,
    pub target_armor_roll: Option<RollOutcome>,
    /// Damage to inflict; `None` on a miss.
    pub damage: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendReport {
    pub defend_dr: i32,
    pub defend_roll: RollOutcome,
    pub outcome: DefendOutcome,
    pub damage_roll: Option<RollOutcome>,
    pub armor_roll: Option<RollOutcome>,
    /// Armor and helmet that reduced the damage.
    pub items: Vec<ItemRef>,
    /// Damage to take; `None` when the defence succeeded.
    pub damage: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoraleReport {
    pub morale: i32,
    pub morale_roll: RollOutcome,
    pub outcome_roll: Option<RollOutcome>,
    pub outcome: MoraleOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionReport {
    pub roll: RollOutcome,
    pub reaction: Reaction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TributeReport {
    pub tribute_dr: i32,
    pub roll: RollOutcome,
    pub outcome: TributeOutcome,
    pub damage_roll: Option<RollOutcome>,
    /// Damage taken on a failed activation, which also leaves the wielder dizzy.
    pub damage: Option<i32>,
    pub remaining_points: i32,
}

/// Title of an outcome card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutcomeTitle {
    /// A skill card; carries the item's own roll label.
    Skill(String),
    Favors,
    NeuromancyPointsPerDay,
    Rest,
    Starvation,
    Infection,
}

/// What an outcome did to the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effect {
    /// Only the roll is shown.
    RollOnly,
    NoEffect,
    Heal(i32),
    TakeDamage(i32),
    Favors(i32),
    NeuromancyPoints(i32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeReport {
    pub title: OutcomeTitle,
    pub roll: Option<RollOutcome>,
    pub effect: Effect,
}

impl OutcomeReport {
    pub fn rolled(title: OutcomeTitle, roll: RollOutcome, effect: Effect) -> Self {
        Self {
            title,
            roll: Some(roll),
            effect,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestReport {
    pub length: RestLength,
    pub food: Food,
    pub infected: bool,
    pub steps: Vec<OutcomeReport>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImproveReport {
    /// HP first, then the abilities in sheet order.
    pub changes: Vec<StatChange>,
    /// Rolls made, kept for the record; none of them is displayed.
    pub rolls: Vec<RollOutcome>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrokenReport {
    pub roll: RollOutcome,
    pub outcome: BrokenOutcome,
    pub additional_rolls: Vec<RollOutcome>,
    /// Test DR for each hour of a hemorrhage, first hour first.
    pub hemorrhage_drs: Vec<i32>,
    /// Ability reduced by one for good.
    pub ability_loss: Option<AbilityKind>,
}
