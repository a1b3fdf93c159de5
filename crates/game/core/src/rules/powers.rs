//! Neuromancy, favors, and skill cards.

use crate::character::{AbilityKind, Character, CharacterChange, ItemId, ResourceMeter};
use crate::error::{Resource, RuleError};
use crate::input::InputError;
use crate::report::{Effect, OutcomeReport, OutcomeTitle, Report, TributeReport};

use super::{Resolution, RulesEngine};

/// Outcome of a tribute activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TributeOutcome {
    CriticalSuccess,
    Success,
    Fumble,
    Failure,
}

impl TributeOutcome {
    pub fn classify(total: i32, dr: i32, is_crit: bool, is_fumble: bool) -> Self {
        match (total >= dr, is_crit, is_fumble) {
            (true, true, _) => Self::CriticalSuccess,
            (true, false, _) => Self::Success,
            (false, _, true) => Self::Fumble,
            (false, _, false) => Self::Failure,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::Success)
    }

    pub const fn label_key(self) -> &'static str {
        match self {
            Self::CriticalSuccess => "tribute.critical",
            Self::Success => "tribute.success",
            Self::Fumble => "tribute.fumble",
            Self::Failure => "tribute.failure",
        }
    }
}

/// Clamps a rolled pool size at zero and fills the meter to it.
fn refilled(total: i32) -> ResourceMeter {
    ResourceMeter::full(total.max(0))
}

impl RulesEngine<'_> {
    /// Spends a neuromancy point to activate a tribute.
    ///
    /// A presence test against the tribute DR; failure costs `1d2` HP (not
    /// applied here) and leaves the wielder dizzy. The point is spent
    /// either way.
    pub async fn activate_tribute(&self, character: &Character) -> Result<Resolution, RuleError> {
        if character.neuromancy_points.is_empty() {
            return Err(RuleError::ResourceExhausted {
                resource: Resource::NeuromancyPoints,
            });
        }

        let tribute_dr = self.config.tribute_dr;
        let roll = self
            .roll_for(character, &format!("d20+@{}", AbilityKind::Presence.roll_path()))
            .await?;
        let outcome = TributeOutcome::classify(roll.total, tribute_dr, roll.is_crit(), roll.is_fumble());

        let mut damage_roll = None;
        if !outcome.is_success() {
            damage_roll = Some(self.roll_for(character, "1d2").await?);
        }
        let damage = damage_roll.as_ref().map(|roll| roll.total);

        let remaining = (character.neuromancy_points.value - 1).max(0);
        let change = CharacterChange::new().with_neuromancy_points(ResourceMeter::new(
            remaining,
            character.neuromancy_points.max,
        ));

        Ok(Resolution::new(
            Report::Tribute(TributeReport {
                tribute_dr,
                roll,
                outcome,
                damage_roll,
                damage,
                remaining_points: remaining,
            }),
            change,
        ))
    }

    /// Rolls a skill card's formula under its own label.
    pub async fn use_skill(&self, character: &Character, item: ItemId) -> Result<Resolution, RuleError> {
        let skill = character.item(item).ok_or(InputError::ItemNotFound(item))?;
        let (Some(label), Some(formula)) = (&skill.roll_label, &skill.roll_formula) else {
            return Err(InputError::SkillNotRollable(item).into());
        };
        if label.trim().is_empty() || formula.trim().is_empty() {
            return Err(InputError::SkillNotRollable(item).into());
        }

        let roll = self.roll_for(character, formula).await?;
        Ok(Resolution::report_only(Report::Outcome(OutcomeReport::rolled(
            OutcomeTitle::Skill(label.clone()),
            roll,
            Effect::RollOnly,
        ))))
    }

    /// Rolls the class favor die and refills favors to the result.
    pub async fn roll_omens(&self, character: &Character) -> Result<Resolution, RuleError> {
        let (report, favors) = self.omens(character).await?;
        Ok(Resolution::new(
            Report::Outcome(report),
            CharacterChange::new().with_favors(favors),
        ))
    }

    /// Rolls `d4 + presence` and refills neuromancy points to the result.
    pub async fn roll_neuromancy_points(&self, character: &Character) -> Result<Resolution, RuleError> {
        let (report, points) = self.neuromancy_points(character).await?;
        Ok(Resolution::new(
            Report::Outcome(report),
            CharacterChange::new().with_neuromancy_points(points),
        ))
    }

    pub(super) async fn omens(
        &self,
        character: &Character,
    ) -> Result<(OutcomeReport, ResourceMeter), RuleError> {
        let class = character.class_item().ok_or(InputError::NoClassItem)?;
        let roll = self.roll("@favorDie", &class.roll_context()).await?;
        let favors = refilled(roll.total);
        Ok((
            OutcomeReport::rolled(OutcomeTitle::Favors, roll, Effect::Favors(favors.value)),
            favors,
        ))
    }

    pub(super) async fn neuromancy_points(
        &self,
        character: &Character,
    ) -> Result<(OutcomeReport, ResourceMeter), RuleError> {
        let roll = self
            .roll_for(character, &format!("d4+@{}", AbilityKind::Presence.roll_path()))
            .await?;
        let points = refilled(roll.total);
        Ok((
            OutcomeReport::rolled(
                OutcomeTitle::NeuromancyPointsPerDay,
                roll,
                Effect::NeuromancyPoints(points.value),
            ),
            points,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Abilities, CharacterId, Item};
    use crate::rules::testing::{Fixture, hero};

    fn wielder(points: i32) -> Character {
        hero().with_neuromancy_points(ResourceMeter::new(points, 3))
    }

    #[tokio::test]
    async fn tribute_without_points_is_refused_before_rolling() {
        let fixture = Fixture::new([15]);
        let err = fixture.engine().activate_tribute(&wielder(0)).await.unwrap_err();
        assert_eq!(
            err,
            RuleError::ResourceExhausted {
                resource: Resource::NeuromancyPoints
            }
        );
        assert_eq!(fixture.remaining(), 1);
    }

    #[tokio::test]
    async fn failed_tribute_costs_hp_and_a_point() {
        let fixture = Fixture::new([4, 2]);
        let resolution = fixture.engine().activate_tribute(&wielder(2)).await.unwrap();
        let Report::Tribute(report) = resolution.report else {
            panic!("expected tribute report");
        };
        assert_eq!(report.outcome, TributeOutcome::Failure);
        assert_eq!(report.damage, Some(2));
        assert_eq!(report.remaining_points, 1);
        assert_eq!(
            resolution.change.neuromancy_points,
            Some(ResourceMeter::new(1, 3))
        );
    }

    #[tokio::test]
    async fn successful_tribute_still_spends_a_point() {
        let fixture = Fixture::new([20]);
        let resolution = fixture.engine().activate_tribute(&wielder(1)).await.unwrap();
        let Report::Tribute(report) = resolution.report else {
            panic!("expected tribute report");
        };
        assert_eq!(report.outcome, TributeOutcome::CriticalSuccess);
        assert!(report.damage_roll.is_none());
        assert_eq!(report.remaining_points, 0);
    }

    #[tokio::test]
    async fn skill_requires_label_and_formula() {
        let fixture = Fixture::new([3]);
        let character = hero()
            .with_item(Item::skill(ItemId(20), "Bloodhound", "Track", "1d6+@abilities.presence.value"))
            .with_item(Item::new(ItemId(21), "Blank card", crate::character::ItemType::Skill));

        let err = fixture.engine().use_skill(&character, ItemId(21)).await.unwrap_err();
        assert_eq!(err, RuleError::Input(InputError::SkillNotRollable(ItemId(21))));
        let err = fixture.engine().use_skill(&character, ItemId(99)).await.unwrap_err();
        assert_eq!(err, RuleError::Input(InputError::ItemNotFound(ItemId(99))));

        let resolution = fixture.engine().use_skill(&character, ItemId(20)).await.unwrap();
        let Report::Outcome(report) = resolution.report else {
            panic!("expected outcome report");
        };
        assert_eq!(report.title, OutcomeTitle::Skill("Track".into()));
        assert_eq!(report.roll.map(|roll| roll.total), Some(3));
    }

    #[tokio::test]
    async fn omens_use_the_last_class_item() {
        let fixture = Fixture::new([3]);
        let character = hero()
            .with_item(Item::class(ItemId(30), "Old class", "1d2"))
            .with_item(Item::class(ItemId(31), "Heretic priest", "1d4"));
        let resolution = fixture.engine().roll_omens(&character).await.unwrap();
        assert_eq!(resolution.change.favors, Some(ResourceMeter::full(3)));
    }

    #[tokio::test]
    async fn omens_without_class_is_invalid() {
        let fixture = Fixture::new([3]);
        let err = fixture.engine().roll_omens(&hero()).await.unwrap_err();
        assert_eq!(err, RuleError::Input(InputError::NoClassItem));
    }

    #[tokio::test]
    async fn neuromancy_points_floor_at_zero() {
        let fixture = Fixture::new([1]);
        let feeble = Character::new(CharacterId(2), "Wretch", Abilities::new(0, 0, -3, 0), 4);
        let resolution = fixture.engine().roll_neuromancy_points(&feeble).await.unwrap();
        assert_eq!(
            resolution.change.neuromancy_points,
            Some(ResourceMeter::full(0))
        );
        let Report::Outcome(report) = resolution.report else {
            panic!("expected outcome report");
        };
        assert_eq!(report.effect, Effect::NeuromancyPoints(0));
    }
}
