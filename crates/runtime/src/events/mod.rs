//! Topic-based event bus for dice, chat, and character notifications.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CharacterEvent, ChatEvent, DiceEvent};
