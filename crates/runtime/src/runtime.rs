//! High-level runtime orchestrator.
//!
//! The runtime owns the collaborators and exposes one async method per rule
//! action. Every method runs the same pipeline: load the character, collect
//! input, validate, resolve, render, post, commit, and return the report.

use std::sync::Arc;
use std::time::Duration;

use grimm_core::{
    AbilityKind, ArmorTierTable, Character, CharacterId, DiceService, Food, InputMemory, ItemId,
    Report, Resolution, RestLength, RuleError, RulesConfig, RulesEngine, TablesOracle,
};
use tokio::sync::broadcast;

use crate::api::{AcceptDefaults, InputProvider, Result, RuntimeError};
use crate::dice::{DisplayedDice, RandDice};
use crate::events::{CharacterEvent, Event, EventBus, Topic};
use crate::messaging::{ChatMessage, DICE_SOUND, EventSink, MessageSink};
use crate::render::{EnglishLocalizer, Localizer, ReportRenderer, TemplateKind, TextRenderer};
use crate::repository::{CharacterRepository, InMemoryCharacterRepo};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Seed for the default dice source; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// How long the default dice service holds each displayed roll.
    pub display_delay_ms: u64,
    pub bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            display_delay_ms: 0,
            bus_capacity: 100,
        }
    }
}

/// Runs rule actions against stored characters.
///
/// Design: [`RulesEngine`] stays pure; the runtime owns every side effect and
/// performs them in a fixed order after resolution succeeds.
pub struct RulesRuntime {
    dice: Arc<dyn DiceService>,
    tables: Arc<dyn TablesOracle>,
    rules: RulesConfig,
    repository: Arc<dyn CharacterRepository>,
    renderer: Arc<dyn ReportRenderer>,
    sink: Arc<dyn MessageSink>,
    localizer: Arc<dyn Localizer>,
    input: Arc<dyn InputProvider>,
    bus: EventBus,
}

impl RulesRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RulesRuntimeBuilder {
        RulesRuntimeBuilder::new()
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribe to runtime events on one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    fn engine(&self) -> RulesEngine<'_> {
        RulesEngine::new(self.dice.as_ref(), self.tables.as_ref(), &self.rules)
    }

    async fn load(&self, id: CharacterId) -> Result<Character> {
        self.repository
            .load(id)
            .await?
            .ok_or(RuntimeError::CharacterNotFound(id))
    }

    /// Renders, posts, and commits a resolution.
    async fn finish(
        &self,
        character: &Character,
        action: &'static str,
        resolved: std::result::Result<Resolution, RuleError>,
    ) -> Result<Option<Report>> {
        let Resolution { report, change } = match resolved {
            Ok(resolution) => resolution,
            Err(RuleError::ResourceExhausted { resource }) => {
                tracing::warn!(character = %character.id, action, %resource, "resource exhausted");
                let text = self.localizer.localize(&format!("warning.{resource}"));
                self.sink.warn(&text).await;
                return Err(RuleError::ResourceExhausted { resource }.into());
            }
            Err(err) => {
                tracing::debug!(character = %character.id, action, error = %err, "action failed");
                return Err(err.into());
            }
        };

        let content = self
            .renderer
            .render(TemplateKind::for_report(&report), &report)?;
        let sound = (!report.rolls().is_empty()).then(|| DICE_SOUND.to_string());
        self.sink
            .post(ChatMessage {
                content,
                sound,
                speaker: character.name.clone(),
            })
            .await;

        if !change.is_empty() {
            self.repository.update(character.id, &change).await?;
            self.bus.publish(Event::Character(CharacterEvent::Updated {
                id: character.id,
                fields: change.fields(),
                change,
            }));
        }
        tracing::info!(character = %character.id, action, "committed");
        Ok(Some(report))
    }

    /// Rolls a `1d20` test with one ability.
    pub async fn test_ability(&self, id: CharacterId, ability: AbilityKind) -> Result<Option<Report>> {
        tracing::info!(character = %id, %ability, "ability test");
        let character = self.load(id).await?;
        let resolved = self.engine().test_ability(&character, ability).await;
        self.finish(&character, "test_ability", resolved).await
    }

    /// Attacks with a weapon after collecting the DR and target armor.
    ///
    /// Returns `Ok(None)` if the input provider cancels.
    pub async fn attack(
        &self,
        id: CharacterId,
        item: Option<ItemId>,
        memory: &mut InputMemory,
    ) -> Result<Option<Report>> {
        tracing::info!(character = %id, "attack");
        let character = self.load(id).await?;
        let engine = self.engine();
        let prompt = engine.attack_prompt(&character, item, memory);
        let Some(form) = self.input.attack_form(&prompt).await else {
            tracing::warn!(character = %id, "attack cancelled");
            return Ok(None);
        };
        let input = form.validate().map_err(RuleError::from)?;
        memory.remember_attack(&input);

        let resolved = engine.attack(&character, &input).await;
        self.finish(&character, "attack", resolved).await
    }

    /// Defends after collecting the DR and incoming attack.
    ///
    /// Returns `Ok(None)` if the input provider cancels.
    pub async fn defend(&self, id: CharacterId, memory: &mut InputMemory) -> Result<Option<Report>> {
        tracing::info!(character = %id, "defend");
        let character = self.load(id).await?;
        let engine = self.engine();
        let prompt = engine.defend_prompt(&character, memory)?;
        let Some(form) = self.input.defend_form(&prompt).await else {
            tracing::warn!(character = %id, "defend cancelled");
            return Ok(None);
        };
        let input = form.validate().map_err(RuleError::from)?;
        memory.remember_defend(&input);

        let resolved = engine.defend(&character, &input).await;
        self.finish(&character, "defend", resolved).await
    }

    pub async fn check_morale(&self, id: CharacterId) -> Result<Option<Report>> {
        tracing::info!(character = %id, "morale check");
        let character = self.load(id).await?;
        let resolved = self.engine().check_morale(&character).await;
        self.finish(&character, "check_morale", resolved).await
    }

    pub async fn check_reaction(&self, id: CharacterId) -> Result<Option<Report>> {
        tracing::info!(character = %id, "reaction check");
        let character = self.load(id).await?;
        let resolved = self.engine().check_reaction(&character).await;
        self.finish(&character, "check_reaction", resolved).await
    }

    /// Spends a neuromancy point on a tribute.
    ///
    /// With no points left a warning is posted and `ResourceExhausted` is
    /// returned.
    pub async fn activate_tribute(&self, id: CharacterId) -> Result<Option<Report>> {
        tracing::info!(character = %id, "tribute");
        let character = self.load(id).await?;
        let resolved = self.engine().activate_tribute(&character).await;
        self.finish(&character, "activate_tribute", resolved).await
    }

    pub async fn use_skill(&self, id: CharacterId, item: ItemId) -> Result<Option<Report>> {
        tracing::info!(character = %id, %item, "skill");
        let character = self.load(id).await?;
        let resolved = self.engine().use_skill(&character, item).await;
        self.finish(&character, "use_skill", resolved).await
    }

    /// Rolls the class favor die to refill favors.
    pub async fn roll_omens(&self, id: CharacterId) -> Result<Option<Report>> {
        tracing::info!(character = %id, "omens");
        let character = self.load(id).await?;
        let resolved = self.engine().roll_omens(&character).await;
        self.finish(&character, "roll_omens", resolved).await
    }

    pub async fn roll_neuromancy_points_per_day(&self, id: CharacterId) -> Result<Option<Report>> {
        tracing::info!(character = %id, "neuromancy points per day");
        let character = self.load(id).await?;
        let resolved = self.engine().roll_neuromancy_points(&character).await;
        self.finish(&character, "roll_neuromancy_points_per_day", resolved)
            .await
    }

    pub async fn rest(
        &self,
        id: CharacterId,
        length: RestLength,
        food: Food,
        infected: bool,
    ) -> Result<Option<Report>> {
        tracing::info!(character = %id, %length, %food, infected, "rest");
        let character = self.load(id).await?;
        let resolved = self.engine().rest(&character, length, food, infected).await;
        self.finish(&character, "rest", resolved).await
    }

    pub async fn improve(&self, id: CharacterId) -> Result<Option<Report>> {
        tracing::info!(character = %id, "improve");
        let character = self.load(id).await?;
        let resolved = self.engine().improve(&character).await;
        self.finish(&character, "improve", resolved).await
    }

    pub async fn roll_broken(&self, id: CharacterId) -> Result<Option<Report>> {
        tracing::info!(character = %id, "broken");
        let character = self.load(id).await?;
        let resolved = self.engine().roll_broken(&character).await;
        self.finish(&character, "roll_broken", resolved).await
    }
}

/// Builder for [`RulesRuntime`] with flexible configuration.
///
/// Anything not set falls back to a working default: seeded or entropy dice
/// that display on the bus, the printed tables and rules, an empty in-memory
/// repository, English text cards posted to the bus, and forms accepted as
/// prefilled.
pub struct RulesRuntimeBuilder {
    config: RuntimeConfig,
    dice: Option<Arc<dyn DiceService>>,
    tables: Arc<dyn TablesOracle>,
    rules: RulesConfig,
    repository: Option<Arc<dyn CharacterRepository>>,
    renderer: Option<Arc<dyn ReportRenderer>>,
    sink: Option<Arc<dyn MessageSink>>,
    localizer: Arc<dyn Localizer>,
    input: Arc<dyn InputProvider>,
    bus: Option<EventBus>,
}

impl RulesRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            dice: None,
            tables: Arc::new(ArmorTierTable::default()),
            rules: RulesConfig::default(),
            repository: None,
            renderer: None,
            sink: None,
            localizer: Arc::new(EnglishLocalizer),
            input: Arc::new(AcceptDefaults),
            bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dice(mut self, dice: impl DiceService + 'static) -> Self {
        self.dice = Some(Arc::new(dice));
        self
    }

    pub fn tables(mut self, tables: impl TablesOracle + 'static) -> Self {
        self.tables = Arc::new(tables);
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Shared so the host can keep reading the characters it stores.
    pub fn repository(mut self, repository: Arc<dyn CharacterRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn renderer(mut self, renderer: impl ReportRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Localizer for warnings. The default renderer always uses English.
    pub fn localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Arc::new(localizer);
        self
    }

    pub fn input(mut self, input: impl InputProvider + 'static) -> Self {
        self.input = Arc::new(input);
        self
    }

    /// Share an existing bus instead of creating one.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the runtime
    pub fn build(self) -> RulesRuntime {
        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.bus_capacity));
        let dice = self.dice.unwrap_or_else(|| {
            Arc::new(
                DisplayedDice::new(RandDice::new(self.config.seed))
                    .with_bus(bus.clone())
                    .with_delay(Duration::from_millis(self.config.display_delay_ms)),
            )
        });
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(EventSink::new(bus.clone())));

        RulesRuntime {
            dice,
            tables: self.tables,
            rules: self.rules,
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(InMemoryCharacterRepo::new())),
            renderer: self
                .renderer
                .unwrap_or_else(|| Arc::new(TextRenderer::new(EnglishLocalizer))),
            sink,
            localizer: self.localizer,
            input: self.input,
            bus,
        }
    }
}
