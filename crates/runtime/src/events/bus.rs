//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CharacterEvent, ChatEvent, DiceEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Rolls shown to the table
    Dice,
    /// Chat cards and warnings
    Chat,
    /// Committed character changes
    Character,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Dice(DiceEvent),
    Chat(ChatEvent),
    Character(CharacterEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Dice(_) => Topic::Dice,
            Event::Chat(_) => Topic::Chat,
            Event::Character(_) => Topic::Character,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    dice: broadcast::Sender<Event>,
    chat: broadcast::Sender<Event>,
    character: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            dice: broadcast::channel(capacity).0,
            chat: broadcast::channel(capacity).0,
            character: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Dice => &self.dice,
            Topic::Chat => &self.chat,
            Topic::Character => &self.character,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut chat = bus.subscribe(Topic::Chat);
        let mut dice = bus.subscribe(Topic::Dice);

        bus.publish(Event::Chat(ChatEvent::Warning("no favors".into())));

        match chat.recv().await.unwrap() {
            Event::Chat(ChatEvent::Warning(text)) => assert_eq!(text, "no favors"),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(dice.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(Event::Chat(ChatEvent::Warning("ignored".into())));
    }
}
