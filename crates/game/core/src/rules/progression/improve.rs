use crate::character::{AbilityKind, Character, CharacterChange, MAX_ABILITY, MIN_ABILITY};
use crate::error::RuleError;
use crate::report::{ImproveReport, Report};
use crate::rules::{Resolution, RulesEngine};

/// A stat touched by improvement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stat {
    MaxHp,
    Ability(AbilityKind),
}

impl Stat {
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::MaxHp => "stat.hp",
            Self::Ability(kind) => kind.label_key(),
        }
    }
}

/// Old and new value of one stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatChange {
    pub stat: Stat,
    pub old: i32,
    pub new: i32,
}

impl StatChange {
    /// Signed difference; positive for a gain.
    pub fn delta(&self) -> i32 {
        self.new - self.old
    }
}

/// New ability value after a `1d6` improvement roll.
///
/// A 1, or a roll under the current value, loses a point; anything else
/// gains one. The result stays within the ability range.
pub fn improved_ability(old: i32, roll: i32) -> i32 {
    if roll == 1 || roll < old {
        (old - 1).max(MIN_ABILITY)
    } else {
        (old + 1).min(MAX_ABILITY)
    }
}

/// New max HP: grows by `extra` when the `6d10` roll reaches the old max.
pub fn improved_hp_max(old: i32, hp_roll: i32, extra: Option<i32>) -> i32 {
    match extra {
        Some(extra) if hp_roll >= old => old.saturating_add(extra),
        _ => old,
    }
}

impl RulesEngine<'_> {
    /// Rolls for better HP and abilities between adventures.
    ///
    /// HP first, then strength, agility, presence, and toughness. The rolls
    /// are not displayed; one report lists every stat.
    pub async fn improve(&self, character: &Character) -> Result<Resolution, RuleError> {
        let ctx = character.roll_context();
        let mut rolls = Vec::new();
        let mut changes = Vec::with_capacity(1 + AbilityKind::ALL.len());
        let mut change = CharacterChange::new();

        let old_hp = character.hp.max;
        let hp_roll = self.evaluate("6d10", &ctx)?;
        let extra = if hp_roll.total >= old_hp {
            Some(self.evaluate("1d6", &ctx)?)
        } else {
            None
        };
        let new_hp = improved_hp_max(old_hp, hp_roll.total, extra.as_ref().map(|roll| roll.total));
        rolls.push(hp_roll);
        rolls.extend(extra);
        change = change.with_hp_max(new_hp);
        changes.push(StatChange {
            stat: Stat::MaxHp,
            old: old_hp,
            new: new_hp,
        });

        for kind in AbilityKind::ALL {
            let roll = self.evaluate("1d6", &ctx)?;
            let old = character.ability(kind);
            let new = improved_ability(old, roll.total);
            change.set_ability(kind, new);
            changes.push(StatChange {
                stat: Stat::Ability(kind),
                old,
                new,
            });
            rolls.push(roll);
        }

        Ok(Resolution::new(
            Report::Improve(ImproveReport { changes, rolls }),
            change,
        ))
    }
}
