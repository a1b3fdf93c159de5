use crate::character::Character;
use crate::error::RuleError;
use crate::report::{MoraleReport, Report};
use crate::rules::{Resolution, RulesEngine};

/// Result of a morale check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MoraleOutcome {
    StandsFirm,
    Flees,
    Surrenders,
}

impl MoraleOutcome {
    /// Whether a `2d6` total breaks the creature's nerve.
    pub fn breaks(total: i32, morale: i32) -> bool {
        total > morale
    }

    /// What a broken creature does, from a `1d6` total.
    pub fn broken_reaction(total: i32) -> Self {
        if total <= 3 {
            Self::Flees
        } else {
            Self::Surrenders
        }
    }

    pub const fn label_key(self) -> &'static str {
        match self {
            Self::StandsFirm => "morale.stands_firm",
            Self::Flees => "morale.flees",
            Self::Surrenders => "morale.surrenders",
        }
    }
}

impl RulesEngine<'_> {
    /// Rolls `2d6` against the morale threshold; a broken creature then
    /// rolls `1d6` to flee or surrender.
    pub async fn check_morale(&self, character: &Character) -> Result<Resolution, RuleError> {
        let morale_roll = self.roll_for(character, "2d6").await?;
        let mut outcome_roll = None;
        let mut outcome = MoraleOutcome::StandsFirm;
        if MoraleOutcome::breaks(morale_roll.total, character.morale) {
            let roll = self.roll_for(character, "1d6").await?;
            outcome = MoraleOutcome::broken_reaction(roll.total);
            outcome_roll = Some(roll);
        }
        Ok(Resolution::report_only(Report::Morale(MoraleReport {
            morale: character.morale,
            morale_roll,
            outcome_roll,
            outcome,
        })))
    }
}
