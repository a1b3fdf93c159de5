use grimm_core::Report;
use serde::Serialize;

use super::{RenderError, ReportRenderer, TemplateKind};

/// Renders cards as JSON documents for clients that lay them out themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

#[derive(Serialize)]
struct Card<'a> {
    template: TemplateKind,
    #[serde(flatten)]
    report: &'a Report,
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, template: TemplateKind, report: &Report) -> Result<String, RenderError> {
        let card = Card { template, report };
        let result = if self.pretty {
            serde_json::to_string_pretty(&card)
        } else {
            serde_json::to_string(&card)
        };
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use grimm_core::report::{BrokenReport, ReactionReport, Report};
    use grimm_core::rules::{BrokenOutcome, Reaction};
    use grimm_core::RollOutcome;

    use super::*;

    #[test]
    fn card_carries_template_and_report_kind() {
        let report = Report::Reaction(ReactionReport {
            roll: RollOutcome {
                formula: "2d6".into(),
                total: 8,
                terms: Vec::new(),
            },
            reaction: Reaction::Indifferent,
        });
        let json = JsonRenderer::default()
            .render(TemplateKind::for_report(&report), &report)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["template"], "reaction");
        assert_eq!(value["kind"], "reaction");
        assert_eq!(value["reaction"], "indifferent");
    }

    #[test]
    fn broken_card_carries_hemorrhage_schedule() {
        let outcome = BrokenOutcome::Hemorrhage { hours: 2 };
        let report = Report::Broken(BrokenReport {
            roll: RollOutcome {
                formula: "1d4".into(),
                total: 3,
                terms: Vec::new(),
            },
            outcome,
            additional_rolls: Vec::new(),
            hemorrhage_drs: outcome.hemorrhage_drs(),
            ability_loss: outcome.ability_loss(),
        });
        let json = JsonRenderer::default()
            .render(TemplateKind::Broken, &report)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hemorrhage_drs"], serde_json::json!([16, 18]));
        assert!(value["ability_loss"].is_null());
    }
}
