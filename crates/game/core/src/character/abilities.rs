//! The four abilities every character tests against.

use crate::error::{ErrorSeverity, GameError};

/// Lowest value an ability can drop to.
pub const MIN_ABILITY: i32 = -3;

/// Highest value an ability can reach.
pub const MAX_ABILITY: i32 = 6;

/// Ability identifiers.
///
/// - **Strength**: melee attacks, carrying capacity
/// - **Agility**: defence, agility tests (armor and encumbrance penalize it)
/// - **Presence**: ranged attacks, tributes, neuromancy points
/// - **Toughness**: enduring harm
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    Strength,
    Agility,
    Presence,
    Toughness,
}

impl AbilityKind {
    /// All abilities in sheet order.
    pub const ALL: [AbilityKind; 4] = [
        AbilityKind::Strength,
        AbilityKind::Agility,
        AbilityKind::Presence,
        AbilityKind::Toughness,
    ];

    /// Dotted roll-context path of this ability's value.
    pub const fn roll_path(self) -> &'static str {
        match self {
            Self::Strength => "abilities.strength.value",
            Self::Agility => "abilities.agility.value",
            Self::Presence => "abilities.presence.value",
            Self::Toughness => "abilities.toughness.value",
        }
    }

    /// `1d20` plus this ability, the formula of every ability-based check.
    pub fn test_formula(self) -> String {
        format!("1d20+@{}", self.roll_path())
    }

    /// Localization key of the ability name.
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Strength => "ability.strength",
            Self::Agility => "ability.agility",
            Self::Presence => "ability.presence",
            Self::Toughness => "ability.toughness",
        }
    }
}

/// Ability scores, each kept within [`MIN_ABILITY`, `MAX_ABILITY`].
///
/// Deserialization rejects out-of-range scores instead of clamping them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "AbilityScores"))]
pub struct Abilities {
    pub strength: i32,
    pub agility: i32,
    pub presence: i32,
    pub toughness: i32,
}

impl Abilities {
    /// Creates ability scores, clamping each into the legal range.
    pub fn new(strength: i32, agility: i32, presence: i32, toughness: i32) -> Self {
        Self {
            strength: clamp_ability(strength),
            agility: clamp_ability(agility),
            presence: clamp_ability(presence),
            toughness: clamp_ability(toughness),
        }
    }

    pub fn get(&self, kind: AbilityKind) -> i32 {
        match kind {
            AbilityKind::Strength => self.strength,
            AbilityKind::Agility => self.agility,
            AbilityKind::Presence => self.presence,
            AbilityKind::Toughness => self.toughness,
        }
    }

    /// Sets an ability, clamped into the legal range.
    pub fn set(&mut self, kind: AbilityKind, value: i32) {
        let value = clamp_ability(value);
        match kind {
            AbilityKind::Strength => self.strength = value,
            AbilityKind::Agility => self.agility = value,
            AbilityKind::Presence => self.presence = value,
            AbilityKind::Toughness => self.toughness = value,
        }
    }
}

/// Clamps a value into [`MIN_ABILITY`, `MAX_ABILITY`].
pub fn clamp_ability(value: i32) -> i32 {
    value.clamp(MIN_ABILITY, MAX_ABILITY)
}

/// An ability score outside [`MIN_ABILITY`, `MAX_ABILITY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "{ability} score {value} is outside [{min}, {max}]",
    min = MIN_ABILITY,
    max = MAX_ABILITY
)]
pub struct AbilityOutOfRange {
    pub ability: AbilityKind,
    pub value: i32,
}

impl GameError for AbilityOutOfRange {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "CHARACTER_ABILITY_OUT_OF_RANGE"
    }
}

/// Unchecked scores as stored on a sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct AbilityScores {
    pub strength: i32,
    pub agility: i32,
    pub presence: i32,
    pub toughness: i32,
}

impl TryFrom<AbilityScores> for Abilities {
    type Error = AbilityOutOfRange;

    fn try_from(scores: AbilityScores) -> Result<Self, Self::Error> {
        let abilities = Self {
            strength: scores.strength,
            agility: scores.agility,
            presence: scores.presence,
            toughness: scores.toughness,
        };
        for ability in AbilityKind::ALL {
            let value = abilities.get(ability);
            if !(MIN_ABILITY..=MAX_ABILITY).contains(&value) {
                return Err(AbilityOutOfRange { ability, value });
            }
        }
        Ok(abilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_scores() {
        let abilities = Abilities::new(9, -7, 2, 0);
        assert_eq!(abilities.strength, MAX_ABILITY);
        assert_eq!(abilities.agility, MIN_ABILITY);
        assert_eq!(abilities.get(AbilityKind::Presence), 2);
    }

    #[test]
    fn checked_scores_reject_the_first_out_of_range_ability() {
        let scores = AbilityScores {
            strength: 2,
            agility: -4,
            presence: 7,
            toughness: 0,
        };
        let err = Abilities::try_from(scores).unwrap_err();
        assert_eq!(
            err,
            AbilityOutOfRange {
                ability: AbilityKind::Agility,
                value: -4
            }
        );
        assert_eq!(err.error_code(), "CHARACTER_ABILITY_OUT_OF_RANGE");

        let scores = AbilityScores {
            strength: 6,
            agility: -3,
            ..AbilityScores::default()
        };
        assert_eq!(Abilities::try_from(scores), Ok(Abilities::new(6, -3, 0, 0)));
    }

    #[test]
    fn ability_kind_parses_case_insensitively() {
        assert_eq!("Agility".parse::<AbilityKind>(), Ok(AbilityKind::Agility));
        assert_eq!(AbilityKind::Toughness.to_string(), "toughness");
        assert_eq!(
            AbilityKind::Strength.test_formula(),
            "1d20+@abilities.strength.value"
        );
    }
}
