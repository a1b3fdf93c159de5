//! Chat messaging: where rendered cards and warnings go.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::events::{ChatEvent, Event, EventBus};

/// Sound played with cards that carry rolls.
pub const DICE_SOUND: &str = "sounds/dice.wav";

/// A rendered card posted to chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
    pub sound: Option<String>,
    /// Name of the character the card is posted as.
    pub speaker: String,
}

/// Destination for chat cards and user-facing warnings.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn post(&self, message: ChatMessage);

    async fn warn(&self, text: &str);
}

/// Publishes messages on the [`Topic::Chat`](crate::Topic::Chat) topic.
#[derive(Clone)]
pub struct EventSink {
    bus: EventBus,
}

impl EventSink {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl MessageSink for EventSink {
    async fn post(&self, message: ChatMessage) {
        self.bus.publish(Event::Chat(ChatEvent::Posted(message)));
    }

    async fn warn(&self, text: &str) {
        self.bus
            .publish(Event::Chat(ChatEvent::Warning(text.to_string())));
    }
}

/// One line of a [`ChatLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEntry {
    Message(ChatMessage),
    Warning(String),
}

/// In-memory chat transcript.
#[derive(Debug, Default)]
pub struct ChatLog {
    entries: Mutex<Vec<ChatEntry>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ChatEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                ChatEntry::Message(message) => Some(message),
                ChatEntry::Warning(_) => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                ChatEntry::Warning(text) => Some(text),
                ChatEntry::Message(_) => None,
            })
            .collect()
    }

    fn push(&self, entry: ChatEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[async_trait]
impl MessageSink for ChatLog {
    async fn post(&self, message: ChatMessage) {
        self.push(ChatEntry::Message(message));
    }

    async fn warn(&self, text: &str) {
        self.push(ChatEntry::Warning(text.to_string()));
    }
}
