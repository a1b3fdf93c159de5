use crate::character::{Character, CharacterChange};
use crate::error::RuleError;
use crate::input::{Food, RestLength};
use crate::report::{Effect, OutcomeReport, OutcomeTitle, Report, RestReport};
use crate::rules::{Resolution, RulesEngine};

/// One step of a rest, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestStep {
    /// Heal HP by the given die, capped at max HP.
    Heal(&'static str),
    /// `d4` damage from going without food.
    Starvation,
    /// `d6` damage from an untreated infection.
    Infection,
    NeuromancyPoints,
    Omens,
    NoEffect,
}

/// Plans the steps of a rest.
///
/// Starvation and infection each cost HP and suppress any recovery. Omens
/// are only rolled when favors have run out and the character has a class.
pub fn rest_plan(
    length: RestLength,
    food: Food,
    infected: bool,
    favors_empty: bool,
    has_class: bool,
) -> Vec<RestStep> {
    match length {
        RestLength::Short => {
            if food == Food::Eat && !infected {
                vec![RestStep::Heal("d4")]
            } else {
                vec![RestStep::NoEffect]
            }
        }
        RestLength::Long => {
            let mut steps = Vec::new();
            if food == Food::Starve {
                steps.push(RestStep::Starvation);
            }
            if infected {
                steps.push(RestStep::Infection);
            }
            if !steps.is_empty() {
                return steps;
            }
            match food {
                Food::Eat => {
                    steps.extend([RestStep::Heal("d6"), RestStep::NeuromancyPoints]);
                    if favors_empty && has_class {
                        steps.push(RestStep::Omens);
                    }
                }
                Food::DontEat | Food::Starve => steps.push(RestStep::NoEffect),
            }
            steps
        }
    }
}

impl RulesEngine<'_> {
    /// Rests, combining every HP and resource effect into one change.
    pub async fn rest(
        &self,
        character: &Character,
        length: RestLength,
        food: Food,
        infected: bool,
    ) -> Result<Resolution, RuleError> {
        let plan = rest_plan(
            length,
            food,
            infected,
            character.favors.value == 0,
            character.class_item().is_some(),
        );

        let mut hp = character.hp.value;
        let mut hp_changed = false;
        let mut change = CharacterChange::new();
        let mut steps = Vec::with_capacity(plan.len());

        for step in plan {
            let report = match step {
                RestStep::Heal(die) => {
                    let roll = self.roll_for(character, die).await?;
                    hp = hp.saturating_add(roll.total).min(character.hp.max);
                    hp_changed = true;
                    let effect = Effect::Heal(roll.total);
                    OutcomeReport::rolled(OutcomeTitle::Rest, roll, effect)
                }
                RestStep::Starvation | RestStep::Infection => {
                    let (title, die) = match step {
                        RestStep::Starvation => (OutcomeTitle::Starvation, "d4"),
                        _ => (OutcomeTitle::Infection, "d6"),
                    };
                    let roll = self.roll_for(character, die).await?;
                    hp = hp.saturating_sub(roll.total).max(0);
                    hp_changed = true;
                    let effect = Effect::TakeDamage(roll.total);
                    OutcomeReport::rolled(title, roll, effect)
                }
                RestStep::NeuromancyPoints => {
                    let (report, points) = self.neuromancy_points(character).await?;
                    change.neuromancy_points = Some(points);
                    report
                }
                RestStep::Omens => {
                    let (report, favors) = self.omens(character).await?;
                    change.favors = Some(favors);
                    report
                }
                RestStep::NoEffect => OutcomeReport {
                    title: OutcomeTitle::Rest,
                    roll: None,
                    effect: Effect::NoEffect,
                },
            };
            steps.push(report);
        }

        if hp_changed {
            change = change.with_hp_value(hp);
        }

        Ok(Resolution::new(
            Report::Rest(RestReport {
                length,
                food,
                infected,
                steps,
            }),
            change,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Item, ItemId, ResourceMeter};
    use crate::rules::testing::{Fixture, hero};

    #[test]
    fn plan_table() {
        use Food::*;
        use RestLength::*;

        assert_eq!(rest_plan(Short, Eat, false, true, true), vec![RestStep::Heal("d4")]);
        assert_eq!(rest_plan(Short, Eat, true, true, true), vec![RestStep::NoEffect]);
        assert_eq!(rest_plan(Short, Starve, false, true, true), vec![RestStep::NoEffect]);
        assert_eq!(rest_plan(Long, Starve, false, true, true), vec![RestStep::Starvation]);
        assert_eq!(
            rest_plan(Long, Starve, true, true, true),
            vec![RestStep::Starvation, RestStep::Infection]
        );
        assert_eq!(rest_plan(Long, Eat, true, true, true), vec![RestStep::Infection]);
        assert_eq!(rest_plan(Long, DontEat, false, true, true), vec![RestStep::NoEffect]);
        assert_eq!(
            rest_plan(Long, Eat, false, true, true),
            vec![RestStep::Heal("d6"), RestStep::NeuromancyPoints, RestStep::Omens]
        );
        assert_eq!(
            rest_plan(Long, Eat, false, false, true),
            vec![RestStep::Heal("d6"), RestStep::NeuromancyPoints]
        );
        assert_eq!(
            rest_plan(Long, Eat, false, true, false),
            vec![RestStep::Heal("d6"), RestStep::NeuromancyPoints]
        );
    }

    #[tokio::test]
    async fn long_rest_with_starvation_only_rolls_starvation() {
        let fixture = Fixture::new([3, 6, 6]);
        let resolution = fixture
            .engine()
            .rest(&hero(), RestLength::Long, Food::Starve, false)
            .await
            .unwrap();
        assert_eq!(resolution.change.hp_value, Some(7));
        assert_eq!(resolution.change.neuromancy_points, None);
        assert_eq!(fixture.remaining(), 2);
    }

    #[tokio::test]
    async fn long_rest_combines_heal_points_and_omens() {
        let fixture = Fixture::new([5, 2, 3]);
        let mut character = hero().with_item(Item::class(ItemId(40), "Wretch", "1d4"));
        character.hp = ResourceMeter::new(7, 10);

        let resolution = fixture
            .engine()
            .rest(&character, RestLength::Long, Food::Eat, false)
            .await
            .unwrap();

        assert_eq!(resolution.change.hp_value, Some(10));
        assert_eq!(resolution.change.neuromancy_points, Some(ResourceMeter::full(2)));
        assert_eq!(resolution.change.favors, Some(ResourceMeter::full(3)));
        let Report::Rest(report) = resolution.report else {
            panic!("expected rest report");
        };
        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.steps[0].effect, Effect::Heal(5));
    }

    #[tokio::test]
    async fn starvation_and_infection_floor_hp_at_zero() {
        let fixture = Fixture::new([4, 6]);
        let mut character = hero();
        character.hp = ResourceMeter::new(3, 10);
        let resolution = fixture
            .engine()
            .rest(&character, RestLength::Long, Food::Starve, true)
            .await
            .unwrap();
        assert_eq!(resolution.change.hp_value, Some(0));
    }

    #[tokio::test]
    async fn fasting_rest_changes_nothing() {
        let fixture = Fixture::new([]);
        let resolution = fixture
            .engine()
            .rest(&hero(), RestLength::Long, Food::DontEat, false)
            .await
            .unwrap();
        assert!(resolution.change.is_empty());
    }
}
