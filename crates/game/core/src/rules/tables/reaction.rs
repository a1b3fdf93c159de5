use crate::character::Character;
use crate::error::RuleError;
use crate::report::{ReactionReport, Report};
use crate::rules::{Resolution, RulesEngine};

/// How an encountered creature reacts (`2d6`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Reaction {
    Kill,
    Angered,
    Indifferent,
    AlmostFriendly,
    Helpful,
}

impl Reaction {
    pub fn from_total(total: i32) -> Self {
        match total {
            ..=3 => Self::Kill,
            4..=6 => Self::Angered,
            7..=8 => Self::Indifferent,
            9..=10 => Self::AlmostFriendly,
            _ => Self::Helpful,
        }
    }

    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Kill => "reaction.kill",
            Self::Angered => "reaction.angered",
            Self::Indifferent => "reaction.indifferent",
            Self::AlmostFriendly => "reaction.almost_friendly",
            Self::Helpful => "reaction.helpful",
        }
    }
}

impl RulesEngine<'_> {
    pub async fn check_reaction(&self, character: &Character) -> Result<Resolution, RuleError> {
        let roll = self.roll_for(character, "2d6").await?;
        let reaction = Reaction::from_total(roll.total);
        Ok(Resolution::report_only(Report::Reaction(ReactionReport {
            roll,
            reaction,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{Fixture, hero};

    #[test]
    fn thresholds() {
        let table: Vec<_> = (2..=12).map(Reaction::from_total).collect();
        assert_eq!(
            table,
            vec![
                Reaction::Kill,
                Reaction::Kill,
                Reaction::Angered,
                Reaction::Angered,
                Reaction::Angered,
                Reaction::Indifferent,
                Reaction::Indifferent,
                Reaction::AlmostFriendly,
                Reaction::AlmostFriendly,
                Reaction::Helpful,
                Reaction::Helpful,
            ]
        );
    }

    #[tokio::test]
    async fn rolls_two_dice() {
        let fixture = Fixture::new([4, 5]);
        let resolution = fixture.engine().check_reaction(&hero()).await.unwrap();
        let Report::Reaction(report) = resolution.report else {
            panic!("expected reaction report");
        };
        assert_eq!(report.reaction, Reaction::AlmostFriendly);
    }
}
