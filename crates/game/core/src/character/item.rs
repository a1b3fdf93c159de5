//! Items carried by a character.
//!
//! Items are plain values owned by the [`Character`](super::Character) in
//! storage order. The *active* item of a type is the first equipped one in
//! that order; see [`Character::first_equipped`](super::Character::first_equipped).

use std::fmt;

use crate::dice::{RollContext, RollValue};

/// Identifier of an item, unique within one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Item category.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemType {
    Weapon,
    Armor,
    Helmet,
    Container,
    /// Anything else that can be carried.
    Misc,
    /// Character class; carries the favor die.
    Class,
    /// Rollable skill or ability card.
    Skill,
}

impl ItemType {
    /// Types that count as carried equipment for weight and container space.
    pub const fn is_equipment(self) -> bool {
        matches!(
            self,
            Self::Weapon | Self::Armor | Self::Helmet | Self::Container | Self::Misc
        )
    }
}

/// Weapon handling, which selects the attack ability.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponType {
    #[default]
    Melee,
    Ranged,
}

impl WeaponType {
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Melee => "weapon.melee",
            Self::Ranged => "weapon.ranged",
        }
    }
}

/// Armor tier meter: `value` is the current (possibly damaged) tier,
/// `max` the tier of the undamaged armor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierMeter {
    pub value: u8,
    pub max: u8,
}

impl TierMeter {
    pub const fn new(value: u8, max: u8) -> Self {
        Self { value, max }
    }

    /// Undamaged armor at the given tier.
    pub const fn full(tier: u8) -> Self {
        Self::new(tier, tier)
    }
}

/// A carried item.
///
/// Attributes that only make sense for some types are optional; resolvers
/// fail with a validation or dice error when a required one is missing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub item_type: ItemType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipped: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub volume: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: Option<TierMeter>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_die: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon_type: Option<WeaponType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roll_label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roll_formula: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub favor_die: Option<String>,
}

#[cfg(feature = "serde")]
fn default_quantity() -> u32 {
    1
}

impl Item {
    /// Creates a bare item of the given type with quantity 1.
    pub fn new(id: ItemId, name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id,
            name: name.into(),
            item_type,
            equipped: false,
            quantity: 1,
            weight: None,
            volume: None,
            capacity: None,
            tier: None,
            damage_die: None,
            weapon_type: None,
            roll_label: None,
            roll_formula: None,
            favor_die: None,
        }
    }

    pub fn weapon(
        id: ItemId,
        name: impl Into<String>,
        damage_die: impl Into<String>,
        weapon_type: WeaponType,
    ) -> Self {
        let mut item = Self::new(id, name, ItemType::Weapon);
        item.damage_die = Some(damage_die.into());
        item.weapon_type = Some(weapon_type);
        item
    }

    pub fn armor(id: ItemId, name: impl Into<String>, tier: TierMeter) -> Self {
        let mut item = Self::new(id, name, ItemType::Armor);
        item.tier = Some(tier);
        item
    }

    pub fn helmet(id: ItemId, name: impl Into<String>) -> Self {
        Self::new(id, name, ItemType::Helmet)
    }

    pub fn container(id: ItemId, name: impl Into<String>, capacity: u32) -> Self {
        let mut item = Self::new(id, name, ItemType::Container);
        item.capacity = Some(capacity);
        item
    }

    pub fn class(id: ItemId, name: impl Into<String>, favor_die: impl Into<String>) -> Self {
        let mut item = Self::new(id, name, ItemType::Class);
        item.favor_die = Some(favor_die.into());
        item
    }

    pub fn skill(
        id: ItemId,
        name: impl Into<String>,
        label: impl Into<String>,
        formula: impl Into<String>,
    ) -> Self {
        let mut item = Self::new(id, name, ItemType::Skill);
        item.roll_label = Some(label.into());
        item.roll_formula = Some(formula.into());
        item
    }

    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Weapon handling; items without one are treated as melee.
    pub fn weapon_type(&self) -> WeaponType {
        self.weapon_type.unwrap_or_default()
    }

    /// Variables this item exposes to dice formulas.
    ///
    /// Only attributes that are set are bound, so a formula naming a missing
    /// one fails with `UnknownVariable`.
    pub fn roll_context(&self) -> RollContext {
        let mut ctx = RollContext::new();
        ctx.insert("quantity", RollValue::Int(saturating_i32(self.quantity)));
        if let Some(die) = &self.damage_die {
            ctx.insert("damageDie", RollValue::formula(die));
        }
        if let Some(die) = &self.favor_die {
            ctx.insert("favorDie", RollValue::formula(die));
        }
        if let Some(capacity) = self.capacity {
            ctx.insert("capacity", RollValue::Int(saturating_i32(capacity)));
        }
        if let Some(tier) = self.tier {
            ctx.insert("tier.value", RollValue::Int(i32::from(tier.value)));
            ctx.insert("tier.max", RollValue::Int(i32::from(tier.max)));
        }
        ctx
    }
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_category_excludes_class_and_skill() {
        assert!(ItemType::Misc.is_equipment());
        assert!(ItemType::Container.is_equipment());
        assert!(!ItemType::Class.is_equipment());
        assert!(!ItemType::Skill.is_equipment());
    }

    #[test]
    fn roll_context_binds_only_present_attributes() {
        let sword = Item::weapon(ItemId(1), "Sword", "1d6", WeaponType::Melee);
        let ctx = sword.roll_context();
        assert_eq!(ctx.get("damageDie"), Some(&RollValue::formula("1d6")));
        assert_eq!(ctx.get("favorDie"), None);
        assert_eq!(ctx.get("quantity"), Some(&RollValue::Int(1)));
    }

    #[test]
    fn missing_weapon_type_defaults_to_melee() {
        let club = Item::new(ItemId(2), "Club", ItemType::Weapon);
        assert_eq!(club.weapon_type(), WeaponType::Melee);
    }
}
