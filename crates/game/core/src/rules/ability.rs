use crate::character::{AbilityKind, Character};
use crate::error::RuleError;
use crate::modifiers;
use crate::report::{AbilityTestReport, Report};

use super::{Resolution, RulesEngine};

impl RulesEngine<'_> {
    /// Rolls `1d20 + ability` and lists the DR modifiers that apply.
    ///
    /// The DR itself is set at the table, so the test has no success flag.
    pub async fn test_ability(
        &self,
        character: &Character,
        ability: AbilityKind,
    ) -> Result<Resolution, RuleError> {
        let dr_modifiers =
            modifiers::ability_test_modifiers(character, ability, self.config, self.tables)?;
        let roll = self.roll_for(character, &ability.test_formula()).await?;
        Ok(Resolution::report_only(Report::AbilityTest(
            AbilityTestReport {
                ability,
                roll,
                dr_modifiers,
            },
        )))
    }
}
