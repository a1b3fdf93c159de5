//! Runtime orchestration for the grimm rule engine.
//!
//! This crate wires the pure resolvers of `grimm-core` to the collaborators a
//! host provides: dice display, card rendering, chat messaging, localization,
//! character persistence, and input collection. Consumers build a
//! [`RulesRuntime`] and call one of its twelve operations; each loads the
//! character, collects input, resolves, renders, posts, and commits.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the error type and the input provider contract
//! - [`dice`] provides the seeded dice source and the displaying dice service
//! - [`events`] provides the topic-based event bus
//! - [`messaging`] and [`render`] turn reports into chat messages
//! - [`repository`] stores characters and commits changes
pub mod api;
pub mod dice;
pub mod events;
pub mod messaging;
pub mod render;
pub mod repository;
pub mod runtime;

pub use api::{AcceptDefaults, FixedInput, InputProvider, Result, RuntimeError};
pub use dice::{DisplayedDice, RandDice};
pub use events::{CharacterEvent, ChatEvent, DiceEvent, Event, EventBus, Topic};
pub use messaging::{ChatEntry, ChatLog, ChatMessage, EventSink, MessageSink};
pub use render::{
    EnglishLocalizer, JsonRenderer, Localizer, RenderError, ReportRenderer, TemplateKind,
    TextRenderer,
};
pub use repository::{CharacterRepository, InMemoryCharacterRepo, RepositoryError};
pub use runtime::{RulesRuntime, RulesRuntimeBuilder, RuntimeConfig};
