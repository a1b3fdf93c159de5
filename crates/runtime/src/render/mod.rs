//! Turning reports into chat card content.
//!
//! A [`ReportRenderer`] picks its layout from the [`TemplateKind`] of a
//! report. Labels go through a [`Localizer`]; reports themselves carry only
//! label keys and numbers.
mod json;
mod locale;
mod text;

pub use json::JsonRenderer;
pub use locale::{EnglishLocalizer, Localizer};
pub use text::TextRenderer;

use grimm_core::Report;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card layout a report is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    AbilityTest,
    Attack,
    Defend,
    Morale,
    Reaction,
    Tribute,
    Outcome,
    Rest,
    Improve,
    Broken,
}

impl TemplateKind {
    pub fn for_report(report: &Report) -> Self {
        match report {
            Report::AbilityTest(_) => Self::AbilityTest,
            Report::Attack(_) => Self::Attack,
            Report::Defend(_) => Self::Defend,
            Report::Morale(_) => Self::Morale,
            Report::Reaction(_) => Self::Reaction,
            Report::Tribute(_) => Self::Tribute,
            Report::Outcome(_) => Self::Outcome,
            Report::Rest(_) => Self::Rest,
            Report::Improve(_) => Self::Improve,
            Report::Broken(_) => Self::Broken,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AbilityTest => "ability_test",
            Self::Attack => "attack",
            Self::Defend => "defend",
            Self::Morale => "morale",
            Self::Reaction => "reaction",
            Self::Tribute => "tribute",
            Self::Outcome => "outcome",
            Self::Rest => "rest",
            Self::Improve => "improve",
            Self::Broken => "broken",
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template {template:?} cannot render a {report} report")]
    TemplateMismatch {
        template: TemplateKind,
        report: &'static str,
    },

    #[error("failed to format card")]
    Format(#[from] std::fmt::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders a report into card content.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, template: TemplateKind, report: &Report) -> Result<String, RenderError>;
}
