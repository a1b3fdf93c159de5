//! Partial state updates produced by resolvers.

use bitflags::bitflags;

use super::{AbilityKind, Character, ResourceMeter, clamp_ability};

bitflags! {
    /// Tracks which fields of a [`Character`] a change touches.
    ///
    /// Each bit represents a single field on the sheet. Hosts use it to build
    /// partial document updates without diffing whole characters.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CharacterFields: u16 {
        const STRENGTH          = 1 << 0;
        const AGILITY           = 1 << 1;
        const PRESENCE          = 1 << 2;
        const TOUGHNESS         = 1 << 3;
        const HP_VALUE          = 1 << 4;
        const HP_MAX            = 1 << 5;
        const NEUROMANCY_POINTS = 1 << 6;
        const FAVORS            = 1 << 7;
    }
}

impl CharacterFields {
    pub fn ability(kind: AbilityKind) -> Self {
        match kind {
            AbilityKind::Strength => Self::STRENGTH,
            AbilityKind::Agility => Self::AGILITY,
            AbilityKind::Presence => Self::PRESENCE,
            AbilityKind::Toughness => Self::TOUGHNESS,
        }
    }
}

/// Atomic set of new field values for one character.
///
/// Every field holds the *new* value, not a delta, so applying the same
/// change twice is harmless.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterChange {
    pub strength: Option<i32>,
    pub agility: Option<i32>,
    pub presence: Option<i32>,
    pub toughness: Option<i32>,
    pub hp_value: Option<i32>,
    pub hp_max: Option<i32>,
    pub neuromancy_points: Option<ResourceMeter>,
    pub favors: Option<ResourceMeter>,
}

impl CharacterChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ability(&self, kind: AbilityKind) -> Option<i32> {
        match kind {
            AbilityKind::Strength => self.strength,
            AbilityKind::Agility => self.agility,
            AbilityKind::Presence => self.presence,
            AbilityKind::Toughness => self.toughness,
        }
    }

    /// Records a new ability value, clamped into the legal range.
    pub fn set_ability(&mut self, kind: AbilityKind, value: i32) {
        let slot = match kind {
            AbilityKind::Strength => &mut self.strength,
            AbilityKind::Agility => &mut self.agility,
            AbilityKind::Presence => &mut self.presence,
            AbilityKind::Toughness => &mut self.toughness,
        };
        *slot = Some(clamp_ability(value));
    }

    pub fn with_ability(mut self, kind: AbilityKind, value: i32) -> Self {
        self.set_ability(kind, value);
        self
    }

    pub fn with_hp_value(mut self, value: i32) -> Self {
        self.hp_value = Some(value.max(0));
        self
    }

    pub fn with_hp_max(mut self, max: i32) -> Self {
        self.hp_max = Some(max);
        self
    }

    pub fn with_neuromancy_points(mut self, points: ResourceMeter) -> Self {
        self.neuromancy_points = Some(points);
        self
    }

    pub fn with_favors(mut self, favors: ResourceMeter) -> Self {
        self.favors = Some(favors);
        self
    }

    /// Returns the set of fields this change writes.
    pub fn fields(&self) -> CharacterFields {
        let mut fields = CharacterFields::empty();
        for kind in AbilityKind::ALL {
            if self.ability(kind).is_some() {
                fields |= CharacterFields::ability(kind);
            }
        }
        fields.set(CharacterFields::HP_VALUE, self.hp_value.is_some());
        fields.set(CharacterFields::HP_MAX, self.hp_max.is_some());
        fields.set(
            CharacterFields::NEUROMANCY_POINTS,
            self.neuromancy_points.is_some(),
        );
        fields.set(CharacterFields::FAVORS, self.favors.is_some());
        fields
    }

    /// Returns true if applying this change would not touch the character.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Writes the change into a character.
    ///
    /// HP is re-clamped into `[0, max]` afterwards.
    pub fn apply(&self, character: &mut Character) {
        for kind in AbilityKind::ALL {
            if let Some(value) = self.ability(kind) {
                character.abilities.set(kind, value);
            }
        }
        if let Some(max) = self.hp_max {
            character.hp.max = max;
        }
        if let Some(value) = self.hp_value {
            character.hp.value = value;
        }
        character.hp.value = character.hp.value.clamp(0, character.hp.max.max(0));
        if let Some(points) = self.neuromancy_points {
            character.neuromancy_points = points;
        }
        if let Some(favors) = self.favors {
            character.favors = favors;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Abilities, CharacterId};

    #[test]
    fn fields_report_every_touched_value() {
        let change = CharacterChange::new()
            .with_ability(AbilityKind::Agility, 2)
            .with_hp_max(12)
            .with_favors(ResourceMeter::full(3));
        assert_eq!(
            change.fields(),
            CharacterFields::AGILITY | CharacterFields::HP_MAX | CharacterFields::FAVORS
        );
        assert!(CharacterChange::new().is_empty());
    }

    #[test]
    fn apply_clamps_abilities_and_hp() {
        let mut character = Character::new(CharacterId(7), "Ash", Abilities::new(0, -3, 1, 5), 6);
        let change = CharacterChange::new()
            .with_ability(AbilityKind::Agility, -4)
            .with_ability(AbilityKind::Toughness, 7)
            .with_hp_value(-5);
        change.apply(&mut character);
        assert_eq!(character.abilities.agility, -3);
        assert_eq!(character.abilities.toughness, 6);
        assert_eq!(character.hp.value, 0);
    }
}
