//! Asynchronous abstraction for collecting attack and defend parameters.
//!
//! Runtime users plug in [`InputProvider`] implementations so actions can run
//! with dialog input, command-line arguments, or scripted fixtures.
use async_trait::async_trait;
use grimm_core::{AttackForm, AttackPrompt, DefendForm, DefendPrompt};

/// Trait for collecting the parameters an attack or defence needs.
///
/// Returning `None` cancels the action: nothing is rolled, rendered, or
/// committed.
#[async_trait]
pub trait InputProvider: Send + Sync {
    async fn attack_form(&self, prompt: &AttackPrompt) -> Option<AttackForm>;

    async fn defend_form(&self, prompt: &DefendPrompt) -> Option<DefendForm>;
}

/// Submits every form exactly as prefilled.
pub struct AcceptDefaults;

#[async_trait]
impl InputProvider for AcceptDefaults {
    async fn attack_form(&self, prompt: &AttackPrompt) -> Option<AttackForm> {
        Some(prompt.accept())
    }

    async fn defend_form(&self, prompt: &DefendPrompt) -> Option<DefendForm> {
        Some(prompt.accept())
    }
}

/// Submits fixed forms regardless of the prompt; a missing form cancels.
#[derive(Clone, Debug, Default)]
pub struct FixedInput {
    pub attack: Option<AttackForm>,
    pub defend: Option<DefendForm>,
}

impl FixedInput {
    /// Cancels every form.
    pub fn cancel() -> Self {
        Self::default()
    }

    pub fn with_attack(mut self, form: AttackForm) -> Self {
        self.attack = Some(form);
        self
    }

    pub fn with_defend(mut self, form: DefendForm) -> Self {
        self.defend = Some(form);
        self
    }
}

#[async_trait]
impl InputProvider for FixedInput {
    async fn attack_form(&self, _prompt: &AttackPrompt) -> Option<AttackForm> {
        self.attack.clone()
    }

    async fn defend_form(&self, _prompt: &DefendPrompt) -> Option<DefendForm> {
        self.defend.clone()
    }
}
