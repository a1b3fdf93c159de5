//! Plain character and equipment values the rule engine operates on.
//!
//! A [`Character`] is never mutated by a resolver. Resolvers return a
//! [`CharacterChange`] that the host commits after the whole roll sequence of
//! an action has completed.
mod abilities;
mod change;
mod item;

pub use abilities::{
    Abilities, AbilityKind, AbilityOutOfRange, AbilityScores, MAX_ABILITY, MIN_ABILITY,
    clamp_ability,
};
pub use change::{CharacterChange, CharacterFields};
pub use item::{Item, ItemId, ItemType, TierMeter, WeaponType};

use std::fmt;

use crate::dice::{RollContext, RollValue};

/// Unique identifier of a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer resource meter (hit points, neuromancy points, favors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub value: i32,
    pub max: i32,
}

impl ResourceMeter {
    pub fn new(value: i32, max: i32) -> Self {
        Self { value, max }
    }

    /// A meter filled to its maximum.
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    pub fn is_empty(&self) -> bool {
        self.value < 1
    }
}

/// Character sheet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub abilities: Abilities,
    pub hp: ResourceMeter,
    /// Morale threshold; a `2d6` above it breaks the creature's nerve.
    #[cfg_attr(feature = "serde", serde(default))]
    pub morale: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub neuromancy_points: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub favors: ResourceMeter,
    /// Items in storage order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<Item>,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, abilities: Abilities, hp: i32) -> Self {
        Self {
            id,
            name: name.into(),
            abilities,
            hp: ResourceMeter::full(hp),
            morale: 0,
            neuromancy_points: ResourceMeter::default(),
            favors: ResourceMeter::default(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_morale(mut self, morale: i32) -> Self {
        self.morale = morale;
        self
    }

    pub fn with_neuromancy_points(mut self, points: ResourceMeter) -> Self {
        self.neuromancy_points = points;
        self
    }

    pub fn with_favors(mut self, favors: ResourceMeter) -> Self {
        self.favors = favors;
        self
    }

    pub fn ability(&self, kind: AbilityKind) -> i32 {
        self.abilities.get(kind)
    }

    /// Looks up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the active item of a type: the first equipped one in storage order.
    pub fn first_equipped(&self, item_type: ItemType) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.item_type == item_type && item.equipped)
    }

    pub fn equipped_armor(&self) -> Option<&Item> {
        self.first_equipped(ItemType::Armor)
    }

    pub fn equipped_helmet(&self) -> Option<&Item> {
        self.first_equipped(ItemType::Helmet)
    }

    /// The character's class item. When several exist the last one wins.
    pub fn class_item(&self) -> Option<&Item> {
        self.items
            .iter()
            .rev()
            .find(|item| item.item_type == ItemType::Class)
    }

    /// Variables this character exposes to dice formulas.
    pub fn roll_context(&self) -> RollContext {
        let mut ctx = RollContext::new();
        for kind in AbilityKind::ALL {
            ctx.insert(kind.roll_path(), RollValue::Int(self.ability(kind)));
        }
        ctx.insert("hp.value", RollValue::Int(self.hp.value));
        ctx.insert("hp.max", RollValue::Int(self.hp.max));
        ctx.insert("morale", RollValue::Int(self.morale));
        ctx.insert(
            "neuromancyPoints.value",
            RollValue::Int(self.neuromancy_points.value),
        );
        ctx.insert(
            "neuromancyPoints.max",
            RollValue::Int(self.neuromancy_points.max),
        );
        ctx.insert("favors.value", RollValue::Int(self.favors.value));
        ctx.insert("favors.max", RollValue::Int(self.favors.max));
        ctx
    }
}
