use crate::character::{AbilityKind, Character, CharacterChange};
use crate::error::RuleError;
use crate::report::{BrokenReport, Report};
use crate::rules::{Resolution, RulesEngine};

/// What happens to a character reduced to zero HP (`1d4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BrokenOutcome {
    /// Out for some rounds, then wakes with a few HP.
    Unconscious { rounds: i32, wake_hp: i32 },
    /// Agility permanently reduced by one.
    SeveredLimb { rounds: i32, wake_hp: i32 },
    /// Presence permanently reduced by one.
    LostEye { rounds: i32, wake_hp: i32 },
    /// Dead in `hours` unless treated.
    Hemorrhage { hours: i32 },
    Dead,
}

impl BrokenOutcome {
    /// Classifies the injury rolled on a `1d6` after a broken result of 2.
    pub fn injury(limb_total: i32, rounds: i32, wake_hp: i32) -> Self {
        if limb_total <= 5 {
            Self::SeveredLimb { rounds, wake_hp }
        } else {
            Self::LostEye { rounds, wake_hp }
        }
    }

    /// Ability lost for good, if any.
    pub const fn ability_loss(&self) -> Option<AbilityKind> {
        match self {
            Self::SeveredLimb { .. } => Some(AbilityKind::Agility),
            Self::LostEye { .. } => Some(AbilityKind::Presence),
            _ => None,
        }
    }

    /// Test DR for each remaining hour of a hemorrhage.
    pub fn hemorrhage_drs(&self) -> Vec<i32> {
        match self {
            Self::Hemorrhage { hours } if *hours >= 2 => vec![16, 18],
            Self::Hemorrhage { .. } => vec![16],
            _ => Vec::new(),
        }
    }

    pub const fn label_key(&self) -> &'static str {
        match self {
            Self::Unconscious { .. } => "broken.unconscious",
            Self::SeveredLimb { .. } => "broken.severed_limb",
            Self::LostEye { .. } => "broken.lost_eye",
            Self::Hemorrhage { .. } => "broken.hemorrhage",
            Self::Dead => "broken.dead",
        }
    }
}

impl RulesEngine<'_> {
    /// Rolls on the broken table.
    ///
    /// The table roll is displayed before the follow-up rolls it selects.
    pub async fn roll_broken(&self, character: &Character) -> Result<Resolution, RuleError> {
        let roll = self.roll_for(character, "1d4").await?;
        let mut additional_rolls = Vec::new();

        let outcome = match roll.total {
            1 => {
                let rounds = self.roll_for(character, "1d4").await?;
                let wake_hp = self.roll_for(character, "1d4").await?;
                let outcome = BrokenOutcome::Unconscious {
                    rounds: rounds.total,
                    wake_hp: wake_hp.total,
                };
                additional_rolls.extend([rounds, wake_hp]);
                outcome
            }
            2 => {
                let limb = self.roll_for(character, "1d6").await?;
                let rounds = self.roll_for(character, "1d4").await?;
                let wake_hp = self.roll_for(character, "1d4").await?;
                let outcome = BrokenOutcome::injury(limb.total, rounds.total, wake_hp.total);
                additional_rolls.extend([limb, rounds, wake_hp]);
                outcome
            }
            3 => {
                let hours = self.roll_for(character, "1d2").await?;
                let outcome = BrokenOutcome::Hemorrhage { hours: hours.total };
                additional_rolls.push(hours);
                outcome
            }
            _ => BrokenOutcome::Dead,
        };

        let mut change = CharacterChange::new();
        if let Some(ability) = outcome.ability_loss() {
            change.set_ability(ability, character.ability(ability) - 1);
        }

        Ok(Resolution::new(
            Report::Broken(BrokenReport {
                roll,
                outcome,
                additional_rolls,
                hemorrhage_drs: outcome.hemorrhage_drs(),
                ability_loss: outcome.ability_loss(),
            }),
            change,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Abilities, CharacterId};
    use crate::rules::testing::{Fixture, hero};

    async fn broken(faces: &[u32], character: &Character) -> (Resolution, usize) {
        let fixture = Fixture::new(faces.iter().copied());
        let resolution = fixture.engine().roll_broken(character).await.unwrap();
        (resolution, fixture.remaining())
    }

    fn outcome(resolution: &Resolution) -> BrokenOutcome {
        match &resolution.report {
            Report::Broken(report) => report.outcome,
            other => panic!("expected broken report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn four_is_death_with_no_further_rolls() {
        let (resolution, remaining) = broken(&[4, 1, 1], &hero()).await;
        assert_eq!(outcome(&resolution), BrokenOutcome::Dead);
        assert!(resolution.change.is_empty());
        assert_eq!(remaining, 2);
    }

    #[tokio::test]
    async fn severed_limb_costs_agility() {
        let (resolution, _) = broken(&[2, 5, 2, 3], &hero()).await;
        assert_eq!(
            outcome(&resolution),
            BrokenOutcome::SeveredLimb {
                rounds: 2,
                wake_hp: 3
            }
        );
        assert_eq!(resolution.change.agility, Some(0));
        match &resolution.report {
            Report::Broken(report) => {
                assert_eq!(report.ability_loss, Some(AbilityKind::Agility));
                assert!(report.hemorrhage_drs.is_empty());
            }
            other => panic!("expected broken report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lost_eye_floors_presence() {
        let wretch = Character::new(CharacterId(3), "Wretch", Abilities::new(0, 0, -3, 0), 2);
        let (resolution, _) = broken(&[2, 6, 1, 1], &wretch).await;
        assert!(matches!(outcome(&resolution), BrokenOutcome::LostEye { .. }));
        assert_eq!(resolution.change.presence, Some(-3));
    }

    #[tokio::test]
    async fn hemorrhage_lists_hourly_drs() {
        let (resolution, _) = broken(&[3, 2], &hero()).await;
        let outcome = outcome(&resolution);
        assert_eq!(outcome, BrokenOutcome::Hemorrhage { hours: 2 });
        assert_eq!(outcome.hemorrhage_drs(), vec![16, 18]);
        match &resolution.report {
            Report::Broken(report) => assert_eq!(report.hemorrhage_drs, vec![16, 18]),
            other => panic!("expected broken report, got {other:?}"),
        }
        assert_eq!(BrokenOutcome::Hemorrhage { hours: 1 }.hemorrhage_drs(), vec![16]);
    }

    #[tokio::test]
    async fn unconscious_rolls_rounds_then_hp() {
        let (resolution, remaining) = broken(&[1, 3, 4], &hero()).await;
        assert_eq!(
            outcome(&resolution),
            BrokenOutcome::Unconscious {
                rounds: 3,
                wake_hp: 4
            }
        );
        assert_eq!(remaining, 0);
    }
}
