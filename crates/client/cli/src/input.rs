//! Form input taken from command-line flags.
use async_trait::async_trait;
use grimm_core::{AttackForm, AttackPrompt, DefendForm, DefendPrompt};
use grimm_runtime::InputProvider;

/// Overlays flag values on the prefilled forms; unset flags keep the prompt's
/// values.
#[derive(Clone, Debug, Default)]
pub struct ArgsInput {
    pub attack_dr: Option<i32>,
    pub target_armor: Option<String>,
    pub defend_dr: Option<i32>,
    pub incoming_attack: Option<String>,
}

#[async_trait]
impl InputProvider for ArgsInput {
    async fn attack_form(&self, prompt: &AttackPrompt) -> Option<AttackForm> {
        let mut form = prompt.accept();
        if let Some(dr) = self.attack_dr {
            form.attack_dr = Some(dr);
        }
        if let Some(armor) = &self.target_armor {
            form.target_armor = Some(armor.clone());
        }
        Some(form)
    }

    async fn defend_form(&self, prompt: &DefendPrompt) -> Option<DefendForm> {
        let mut form = prompt.accept();
        if let Some(dr) = self.defend_dr {
            form.base_dr = Some(dr);
            form.modified_dr = Some(prompt.modified_for(dr));
        }
        if let Some(incoming) = &self.incoming_attack {
            form.incoming_attack = Some(incoming.clone());
        }
        Some(form)
    }
}
