use std::fmt::Write;

use grimm_core::report::{Effect, OutcomeReport, OutcomeTitle};
use grimm_core::rules::BrokenOutcome;
use grimm_core::{DrSource, Report, RollOutcome};

use super::{Localizer, RenderError, ReportRenderer, TemplateKind};

/// Plain-text cards, one line per roll or effect.
pub struct TextRenderer<L> {
    localizer: L,
}

impl<L: Localizer> TextRenderer<L> {
    pub fn new(localizer: L) -> Self {
        Self { localizer }
    }

    fn t(&self, key: &str) -> String {
        self.localizer.localize(key)
    }

    fn roll(&self, out: &mut String, label: &str, roll: &RollOutcome) -> std::fmt::Result {
        let faces: Vec<String> = roll.faces().map(|face| face.to_string()).collect();
        if faces.is_empty() {
            writeln!(out, "{label}: {} = {}", roll.formula, roll.total)
        } else {
            writeln!(
                out,
                "{label}: {} = {} [{}]",
                roll.formula,
                roll.total,
                faces.join(", ")
            )
        }
    }

    fn title(&self, title: &OutcomeTitle) -> String {
        match title {
            OutcomeTitle::Skill(label) => label.clone(),
            OutcomeTitle::Favors => self.t("outcome.favors"),
            OutcomeTitle::NeuromancyPointsPerDay => self.t("outcome.neuromancy_points_per_day"),
            OutcomeTitle::Rest => self.t("outcome.rest"),
            OutcomeTitle::Starvation => self.t("outcome.starvation"),
            OutcomeTitle::Infection => self.t("outcome.infection"),
        }
    }

    fn outcome(&self, out: &mut String, report: &OutcomeReport) -> std::fmt::Result {
        let title = self.title(&report.title);
        match &report.roll {
            Some(roll) => self.roll(out, &title, roll)?,
            None => writeln!(out, "{title}")?,
        }
        let gain = |amount: i32, key: &str| {
            format!("{} {amount} {}", self.t("card.gain"), self.t(key))
        };
        match report.effect {
            Effect::RollOnly => Ok(()),
            Effect::NoEffect => writeln!(out, "{}", self.t("card.no_effect")),
            Effect::Heal(amount) => writeln!(out, "{}", gain(amount, "stat.hp")),
            Effect::TakeDamage(amount) => writeln!(out, "{}", self.take_damage(amount)),
            Effect::Favors(amount) => writeln!(out, "{}", gain(amount, "resource.favors")),
            Effect::NeuromancyPoints(amount) => {
                writeln!(out, "{}", gain(amount, "resource.neuromancy_points"))
            }
        }
    }

    fn take_damage(&self, amount: i32) -> String {
        format!("{} {amount} {}", self.t("card.take"), self.t("card.damage"))
    }

    fn write_card(&self, out: &mut String, report: &Report) -> std::fmt::Result {
        match report {
            Report::AbilityTest(r) => {
                let title = format!("{} {}", self.t(r.ability.label_key()), self.t("card.test"));
                self.roll(out, &title, &r.roll)?;
                for modifier in &r.dr_modifiers {
                    let source = match &modifier.source {
                        DrSource::Encumbered => self.t("dr.encumbered"),
                        DrSource::Armor { name, .. } => name.clone(),
                    };
                    writeln!(out, "{} {:+} ({source})", self.t("card.dr"), modifier.amount)?;
                }
            }
            Report::Attack(r) => {
                writeln!(
                    out,
                    "{}: {} ({}), {} {}",
                    self.t("card.attack"),
                    r.weapon.name,
                    self.t(r.weapon_type.label_key()),
                    self.t("card.dr"),
                    r.attack_dr
                )?;
                self.roll(out, &self.t("card.attack"), &r.attack_roll)?;
                writeln!(out, "{}", self.t(r.outcome.label_key()))?;
                if let Some(roll) = &r.damage_roll {
                    self.roll(out, &r.weapon.name, roll)?;
                }
                if let Some(roll) = &r.target_armor_roll {
                    self.roll(out, &self.t("card.armor"), roll)?;
                }
                if let Some(damage) = r.damage {
                    writeln!(
                        out,
                        "{} {damage} {}",
                        self.t("card.inflict"),
                        self.t("card.damage")
                    )?;
                }
            }
            Report::Defend(r) => {
                writeln!(
                    out,
                    "{}, {} {}",
                    self.t("card.defend"),
                    self.t("card.dr"),
                    r.defend_dr
                )?;
                self.roll(out, &self.t("card.defend"), &r.defend_roll)?;
                writeln!(out, "{}", self.t(r.outcome.label_key()))?;
                if let Some(roll) = &r.damage_roll {
                    self.roll(out, &self.t("card.attack"), roll)?;
                }
                if let Some(roll) = &r.armor_roll {
                    let names: Vec<&str> = r.items.iter().map(|item| item.name.as_str()).collect();
                    let label = format!("{} ({})", self.t("card.armor"), names.join(", "));
                    self.roll(out, &label, roll)?;
                }
                if let Some(damage) = r.damage {
                    writeln!(out, "{}", self.take_damage(damage))?;
                }
            }
            Report::Morale(r) => {
                let title = format!("{} {}", self.t("card.morale"), r.morale);
                self.roll(out, &title, &r.morale_roll)?;
                if let Some(roll) = &r.outcome_roll {
                    self.roll(out, &self.t("card.morale"), roll)?;
                }
                writeln!(out, "{}", self.t(r.outcome.label_key()))?;
            }
            Report::Reaction(r) => {
                self.roll(out, &self.t("card.reaction"), &r.roll)?;
                writeln!(out, "{}", self.t(r.reaction.label_key()))?;
            }
            Report::Tribute(r) => {
                let title = format!(
                    "{}, {} {}",
                    self.t("card.tribute"),
                    self.t("card.dr"),
                    r.tribute_dr
                );
                self.roll(out, &title, &r.roll)?;
                writeln!(out, "{}", self.t(r.outcome.label_key()))?;
                if let Some(roll) = &r.damage_roll {
                    self.roll(out, &self.t("card.damage"), roll)?;
                }
                if let Some(damage) = r.damage {
                    writeln!(out, "{}", self.take_damage(damage))?;
                }
                writeln!(
                    out,
                    "{} {} {}",
                    r.remaining_points,
                    self.t("resource.neuromancy_points"),
                    self.t("card.remaining")
                )?;
            }
            Report::Outcome(r) => self.outcome(out, r)?,
            Report::Rest(r) => {
                writeln!(out, "{}", self.t(&format!("rest.{}", r.length)))?;
                for step in &r.steps {
                    self.outcome(out, step)?;
                }
            }
            Report::Improve(r) => {
                writeln!(out, "{}", self.t("card.improve"))?;
                for change in &r.changes {
                    let label = self.t(change.stat.label_key());
                    let delta = change.delta();
                    if delta > 0 {
                        writeln!(out, "{} {delta} {label}", self.t("card.gain"))?;
                    } else if delta < 0 {
                        writeln!(out, "{} {} {label}", self.t("card.lose"), -delta)?;
                    } else {
                        writeln!(out, "{label} {}", self.t("card.unchanged"))?;
                    }
                }
            }
            Report::Broken(r) => {
                let title = self.t("card.broken");
                self.roll(out, &title, &r.roll)?;
                for roll in &r.additional_rolls {
                    self.roll(out, &title, roll)?;
                }
                let label = self.t(r.outcome.label_key());
                match r.outcome {
                    BrokenOutcome::Unconscious { rounds, wake_hp }
                    | BrokenOutcome::SeveredLimb { rounds, wake_hp }
                    | BrokenOutcome::LostEye { rounds, wake_hp } => writeln!(
                        out,
                        "{label}: {rounds} {}, {wake_hp} {}",
                        self.t("card.rounds"),
                        self.t("stat.hp")
                    )?,
                    BrokenOutcome::Hemorrhage { hours } => {
                        writeln!(out, "{label}: {hours} {}", self.t("card.hours"))?
                    }
                    BrokenOutcome::Dead => writeln!(out, "{label}")?,
                }
                for (hour, dr) in r.hemorrhage_drs.iter().enumerate() {
                    writeln!(
                        out,
                        "{} {}: {} {}{dr}",
                        self.t("card.hour"),
                        hour + 1,
                        self.t("broken.all_tests"),
                        self.t("card.dr")
                    )?;
                }
                if let Some(ability) = r.ability_loss {
                    writeln!(
                        out,
                        "{} 1 {} {}",
                        self.t("card.lose"),
                        self.t(ability.label_key()),
                        self.t("broken.permanently")
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl<L: Localizer> ReportRenderer for TextRenderer<L> {
    fn render(&self, template: TemplateKind, report: &Report) -> Result<String, RenderError> {
        let expected = TemplateKind::for_report(report);
        if expected != template {
            return Err(RenderError::TemplateMismatch {
                template,
                report: expected.as_str(),
            });
        }
        let mut out = String::new();
        self.write_card(&mut out, report)?;
        Ok(out.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use grimm_core::AbilityKind;
    use grimm_core::report::{BrokenReport, ImproveReport};
    use grimm_core::rules::{Stat, StatChange};

    use super::*;
    use crate::render::EnglishLocalizer;

    fn renderer() -> TextRenderer<EnglishLocalizer> {
        TextRenderer::new(EnglishLocalizer)
    }

    #[test]
    fn improve_card_phrases_each_change() {
        let report = Report::Improve(ImproveReport {
            changes: vec![
                StatChange {
                    stat: Stat::MaxHp,
                    old: 8,
                    new: 10,
                },
                StatChange {
                    stat: Stat::Ability(AbilityKind::Agility),
                    old: 2,
                    new: 1,
                },
                StatChange {
                    stat: Stat::Ability(AbilityKind::Strength),
                    old: 6,
                    new: 6,
                },
            ],
            rolls: Vec::new(),
        });
        let card = renderer().render(TemplateKind::Improve, &report).unwrap();
        assert_eq!(card, "Improve\nGain 2 HP\nLose 1 Agility\nStrength unchanged");
    }

    #[test]
    fn outcome_card_shows_roll_and_effect() {
        let report = Report::Outcome(OutcomeReport::rolled(
            OutcomeTitle::Starvation,
            RollOutcome {
                formula: "d4".into(),
                total: 3,
                terms: Vec::new(),
            },
            Effect::TakeDamage(3),
        ));
        let card = renderer().render(TemplateKind::Outcome, &report).unwrap();
        assert_eq!(card, "Starvation: d4 = 3\nTake 3 damage");
    }

    fn broken(outcome: BrokenOutcome, faces: &[(&str, i32)]) -> Report {
        let mut rolls = faces.iter().map(|(formula, total)| RollOutcome {
            formula: (*formula).into(),
            total: *total,
            terms: Vec::new(),
        });
        let roll = rolls.next().unwrap();
        Report::Broken(BrokenReport {
            roll,
            outcome,
            additional_rolls: rolls.collect(),
            hemorrhage_drs: outcome.hemorrhage_drs(),
            ability_loss: outcome.ability_loss(),
        })
    }

    #[test]
    fn hemorrhage_card_lists_test_drs_per_hour() {
        let report = broken(
            BrokenOutcome::Hemorrhage { hours: 2 },
            &[("1d4", 3), ("1d2", 2)],
        );
        let card = renderer().render(TemplateKind::Broken, &report).unwrap();
        assert_eq!(
            card,
            "Broken: 1d4 = 3\nBroken: 1d2 = 2\nHemorrhage: 2 hours\n\
             Hour 1: all tests DR16\nHour 2: all tests DR18"
        );
    }

    #[test]
    fn severed_limb_card_names_the_permanent_loss() {
        let report = broken(
            BrokenOutcome::SeveredLimb {
                rounds: 2,
                wake_hp: 3,
            },
            &[("1d4", 2), ("1d6", 5), ("1d4", 2), ("1d4", 3)],
        );
        let card = renderer().render(TemplateKind::Broken, &report).unwrap();
        assert!(card.ends_with("Severed limb: 2 rounds, 3 HP\nLose 1 Agility permanently"));
    }

    #[test]
    fn mismatched_template_is_rejected() {
        let report = Report::Improve(ImproveReport {
            changes: Vec::new(),
            rolls: Vec::new(),
        });
        let err = renderer().render(TemplateKind::Attack, &report).unwrap_err();
        assert!(matches!(err, RenderError::TemplateMismatch { .. }));
    }
}
