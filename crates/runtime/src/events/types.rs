use grimm_core::{CharacterChange, CharacterFields, CharacterId, RollOutcome};
use serde::{Deserialize, Serialize};

use crate::messaging::ChatMessage;

/// Dice presentation events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceEvent {
    /// A roll was shown to the table.
    Shown { outcome: RollOutcome },
}

/// Chat events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    Posted(ChatMessage),
    Warning(String),
}

/// Character persistence events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterEvent {
    /// A change was committed; `fields` lists what it wrote.
    Updated {
        id: CharacterId,
        fields: CharacterFields,
        change: CharacterChange,
    },
}
