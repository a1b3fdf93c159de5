//! Derived figures: carrying capacity, encumbrance, and DR modifiers.
//!
//! Every armor lookup uses the armor's *current* tier (`tier.value`), so
//! damaged armor both protects less and hinders less.

use crate::character::{AbilityKind, Character, Item, ItemId, ItemType};
use crate::config::RulesConfig;
use crate::env::{ArmorTier, TablesOracle};
use crate::error::RuleError;

/// Why a DR was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrSource {
    Encumbered,
    Armor { item: ItemId, name: String },
}

/// One DR adjustment shown next to a roll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrModifier {
    pub source: DrSource,
    pub amount: i32,
}

impl DrModifier {
    pub fn encumbered(amount: i32) -> Self {
        Self {
            source: DrSource::Encumbered,
            amount,
        }
    }

    pub fn armor(item: &Item, amount: i32) -> Self {
        Self {
            source: DrSource::Armor {
                item: item.id,
                name: item.name.clone(),
            },
            amount,
        }
    }

    pub fn total(modifiers: &[DrModifier]) -> i32 {
        modifiers.iter().map(|modifier| modifier.amount).sum()
    }
}

fn rounded(amount: Option<f64>, quantity: u32) -> u32 {
    match amount {
        Some(amount) if amount > 0.0 => (amount * f64::from(quantity)).ceil() as u32,
        _ => 0,
    }
}

/// Sum of `ceil(weight × quantity)` over carried equipment.
pub fn carrying_weight(character: &Character) -> u32 {
    character
        .items
        .iter()
        .filter(|item| item.item_type.is_equipment())
        .map(|item| rounded(item.weight, item.quantity))
        .sum()
}

/// Weight carried without penalty: strength plus the base capacity.
pub fn normal_capacity(character: &Character, config: &RulesConfig) -> u32 {
    let capacity = character.ability(AbilityKind::Strength) + config.base_capacity;
    u32::try_from(capacity).unwrap_or(0)
}

pub fn max_capacity(character: &Character, config: &RulesConfig) -> u32 {
    normal_capacity(character, config).saturating_mul(2)
}

pub fn is_encumbered(character: &Character, config: &RulesConfig) -> bool {
    carrying_weight(character) > normal_capacity(character, config)
}

/// Space taken in containers by equipment that is not equipped.
pub fn container_space(character: &Character) -> u32 {
    character
        .items
        .iter()
        .filter(|item| {
            item.item_type.is_equipment() && item.item_type != ItemType::Container && !item.equipped
        })
        .map(|item| rounded(item.volume, item.quantity))
        .sum()
}

pub fn container_capacity(character: &Character) -> u32 {
    character
        .items
        .iter()
        .filter(|item| item.item_type == ItemType::Container)
        .filter_map(|item| item.capacity)
        .sum()
}

/// The active armor and its tier entry.
///
/// Armor without a tier meter contributes nothing.
pub fn active_armor_tier<'a>(
    character: &'a Character,
    tables: &(impl TablesOracle + ?Sized),
) -> Result<Option<(&'a Item, ArmorTier)>, RuleError> {
    let Some(armor) = character.equipped_armor() else {
        return Ok(None);
    };
    let Some(tier) = armor.tier else {
        return Ok(None);
    };
    let entry = tables
        .armor_tier(tier.value)
        .ok_or(RuleError::UnknownArmorTier {
            item: armor.id,
            tier: tier.value,
        })?;
    Ok(Some((armor, entry)))
}

/// DR modifiers shown with an ability test.
///
/// Strength is hampered by encumbrance; agility by armor and encumbrance.
pub fn ability_test_modifiers(
    character: &Character,
    ability: AbilityKind,
    config: &RulesConfig,
    tables: &(impl TablesOracle + ?Sized),
) -> Result<Vec<DrModifier>, RuleError> {
    let mut modifiers = Vec::new();
    match ability {
        AbilityKind::Strength => {}
        AbilityKind::Agility => {
            if let Some((armor, tier)) = active_armor_tier(character, tables)?
                && tier.agility_modifier != 0
            {
                modifiers.push(DrModifier::armor(armor, tier.agility_modifier));
            }
        }
        AbilityKind::Presence | AbilityKind::Toughness => return Ok(modifiers),
    }
    if is_encumbered(character, config) {
        modifiers.push(DrModifier::encumbered(config.encumbrance_penalty));
    }
    Ok(modifiers)
}

/// DR modifiers applied to a defence.
pub fn defend_modifiers(
    character: &Character,
    config: &RulesConfig,
    tables: &(impl TablesOracle + ?Sized),
) -> Result<Vec<DrModifier>, RuleError> {
    let mut modifiers = Vec::new();
    if let Some((armor, tier)) = active_armor_tier(character, tables)?
        && tier.defense_modifier != 0
    {
        modifiers.push(DrModifier::armor(armor, tier.defense_modifier));
    }
    if is_encumbered(character, config) {
        modifiers.push(DrModifier::encumbered(config.encumbrance_penalty));
    }
    Ok(modifiers)
}

/// Base defend DR raised by armor and encumbrance.
pub fn modified_defend_dr(
    character: &Character,
    base_dr: i32,
    config: &RulesConfig,
    tables: &(impl TablesOracle + ?Sized),
) -> Result<i32, RuleError> {
    let modifiers = defend_modifiers(character, config, tables)?;
    Ok(base_dr.saturating_add(DrModifier::total(&modifiers)))
}

/// Formula rolled to reduce incoming damage.
///
/// The active armor's tier die, plus one for an active helmet. `None` when
/// neither gives any protection.
pub fn damage_reduction_formula(
    character: &Character,
    tables: &(impl TablesOracle + ?Sized),
) -> Result<Option<String>, RuleError> {
    let armor_die = active_armor_tier(character, tables)?.and_then(|(_, tier)| tier.damage_reduction_die);
    let helmet = character.equipped_helmet().is_some();
    Ok(match (armor_die, helmet) {
        (Some(die), true) => Some(format!("{die}+1")),
        (Some(die), false) => Some(die),
        (None, true) => Some("1".to_string()),
        (None, false) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Abilities, CharacterId, TierMeter};
    use crate::env::ArmorTierTable;

    fn character(strength: i32) -> Character {
        Character::new(CharacterId(1), "Kerg", Abilities::new(strength, 0, 0, 0), 10)
    }

    fn misc(id: u32, weight: f64) -> Item {
        Item::new(ItemId(id), "Sack", ItemType::Misc).with_weight(weight)
    }

    #[test]
    fn carrying_weight_rounds_each_stack_up() {
        let c = character(0)
            .with_item(misc(1, 0.5).with_quantity(3))
            .with_item(misc(2, 1.2))
            .with_item(Item::class(ItemId(3), "Fanged Deserter", "1d2").with_weight(50.0));
        assert_eq!(carrying_weight(&c), 2 + 2);
    }

    #[test]
    fn encumbered_only_above_normal_capacity() {
        let config = RulesConfig::default();
        let at_limit = character(1).with_item(misc(1, 9.0));
        assert_eq!(normal_capacity(&at_limit, &config), 9);
        assert_eq!(max_capacity(&at_limit, &config), 18);
        assert!(!is_encumbered(&at_limit, &config));

        let over = at_limit.with_item(misc(2, 0.1));
        assert!(is_encumbered(&over, &config));
    }

    #[test]
    fn container_space_counts_unequipped_non_containers() {
        let c = character(0)
            .with_item(misc(1, 1.0).with_volume(1.5).with_quantity(2))
            .with_item(misc(2, 1.0).with_volume(4.0).equipped())
            .with_item(Item::container(ItemId(3), "Backpack", 7).with_volume(2.0))
            .with_item(Item::container(ItemId(4), "Pouch", 2));
        assert_eq!(container_space(&c), 3);
        assert_eq!(container_capacity(&c), 9);
    }

    #[test]
    fn agility_modifiers_use_current_tier_and_encumbrance() {
        let tables = ArmorTierTable::default();
        let config = RulesConfig::default();
        let c = character(-3)
            .with_item(Item::armor(ItemId(1), "Scale", TierMeter::new(2, 3)).equipped())
            .with_item(misc(2, 6.0));

        let modifiers = ability_test_modifiers(&c, AbilityKind::Agility, &config, &tables).unwrap();
        assert_eq!(
            modifiers,
            vec![
                DrModifier {
                    source: DrSource::Armor {
                        item: ItemId(1),
                        name: "Scale".into()
                    },
                    amount: 2
                },
                DrModifier::encumbered(2),
            ]
        );

        let strength = ability_test_modifiers(&c, AbilityKind::Strength, &config, &tables).unwrap();
        assert_eq!(strength, vec![DrModifier::encumbered(2)]);
        let presence = ability_test_modifiers(&c, AbilityKind::Presence, &config, &tables).unwrap();
        assert!(presence.is_empty());
    }

    #[test]
    fn modified_defend_dr_adds_armor_and_encumbrance() {
        let tables = ArmorTierTable::default();
        let config = RulesConfig::default();
        let c = character(-3)
            .with_item(Item::armor(ItemId(1), "Plate", TierMeter::full(3)).equipped())
            .with_item(misc(2, 6.0));
        assert_eq!(modified_defend_dr(&c, 12, &config, &tables), Ok(16));
    }

    #[test]
    fn damage_reduction_combines_armor_and_helmet() {
        let tables = ArmorTierTable::default();
        let bare = character(0);
        assert_eq!(damage_reduction_formula(&bare, &tables), Ok(None));

        let helmet_only = character(0).with_item(Item::helmet(ItemId(1), "Cap").equipped());
        assert_eq!(
            damage_reduction_formula(&helmet_only, &tables),
            Ok(Some("1".into()))
        );

        let both = helmet_only
            .with_item(Item::armor(ItemId(2), "Mail", TierMeter::new(1, 2)).equipped());
        assert_eq!(
            damage_reduction_formula(&both, &tables),
            Ok(Some("1d2+1".into()))
        );
    }

    #[test]
    fn unknown_tier_is_an_error() {
        let tables = ArmorTierTable::default();
        let c = character(0).with_item(Item::armor(ItemId(5), "Relic", TierMeter::full(7)).equipped());
        assert_eq!(
            damage_reduction_formula(&c, &tables),
            Err(RuleError::UnknownArmorTier {
                item: ItemId(5),
                tier: 7
            })
        );
    }
}
