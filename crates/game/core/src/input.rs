//! Caller-supplied action parameters.
//!
//! Attack and defence need numbers only the player knows (the DR, the enemy's
//! attack die). The host collects them as raw forms, which are validated
//! here before any die is rolled. Last-used values live in a caller-owned
//! [`InputMemory`] passed explicitly to each action.

use crate::character::{Character, ItemId, ItemType};
use crate::config::RulesConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::modifiers::DrModifier;

/// Missing or invalid action parameters. Always raised before any roll.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no item selected")]
    MissingItem,

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("item {0} is not a weapon")]
    NotAWeapon(ItemId),

    #[error("a positive DR is required")]
    MissingDr,

    #[error("{0} formula is required")]
    MissingFormula(&'static str),

    #[error("character has no class")]
    NoClassItem,

    #[error("item {0} has no roll label or formula")]
    SkillNotRollable(ItemId),
}

impl GameError for InputError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingItem => "INPUT_MISSING_ITEM",
            Self::ItemNotFound(_) => "INPUT_ITEM_NOT_FOUND",
            Self::NotAWeapon(_) => "INPUT_NOT_A_WEAPON",
            Self::MissingDr => "INPUT_MISSING_DR",
            Self::MissingFormula(_) => "INPUT_MISSING_FORMULA",
            Self::NoClassItem => "INPUT_NO_CLASS_ITEM",
            Self::SkillNotRollable(_) => "INPUT_SKILL_NOT_ROLLABLE",
        }
    }
}

/// Last values entered into the attack and defend forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputMemory {
    pub attack_dr: Option<i32>,
    pub target_armor: Option<String>,
    pub defend_dr: Option<i32>,
    pub incoming_attack: Option<String>,
}

impl InputMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember_attack(&mut self, input: &AttackInput) {
        self.attack_dr = Some(input.attack_dr);
        self.target_armor = input.target_armor.clone();
    }

    pub fn remember_defend(&mut self, input: &DefendInput) {
        self.defend_dr = Some(input.base_dr);
        self.incoming_attack = Some(input.incoming_attack.clone());
    }
}

/// Weapon offered in the attack form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponChoice {
    pub id: ItemId,
    pub name: String,
}

/// What the attack form shows before the player confirms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackPrompt {
    pub item: Option<ItemId>,
    pub weapons: Vec<WeaponChoice>,
    pub attack_dr: i32,
    pub target_armor: Option<String>,
}

impl AttackPrompt {
    /// Prefills the form from memory, falling back to configured defaults.
    pub fn new(
        character: &Character,
        item: Option<ItemId>,
        memory: &InputMemory,
        config: &RulesConfig,
    ) -> Self {
        let weapons = character
            .items
            .iter()
            .filter(|item| item.item_type == ItemType::Weapon)
            .map(|item| WeaponChoice {
                id: item.id,
                name: item.name.clone(),
            })
            .collect();
        Self {
            item,
            weapons,
            attack_dr: memory.attack_dr.unwrap_or(config.default_attack_dr),
            target_armor: memory.target_armor.clone(),
        }
    }

    /// The form as submitted without edits.
    pub fn accept(&self) -> AttackForm {
        AttackForm {
            item: self.item,
            attack_dr: Some(self.attack_dr),
            target_armor: self.target_armor.clone(),
        }
    }
}

/// What the defend form shows before the player confirms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendPrompt {
    pub base_dr: i32,
    pub dr_modifiers: Vec<DrModifier>,
    pub modified_dr: i32,
    pub incoming_attack: String,
}

impl DefendPrompt {
    pub fn new(memory: &InputMemory, dr_modifiers: Vec<DrModifier>, config: &RulesConfig) -> Self {
        let base_dr = memory.defend_dr.unwrap_or(config.default_defend_dr);
        let modified_dr = base_dr.saturating_add(DrModifier::total(&dr_modifiers));
        Self {
            base_dr,
            dr_modifiers,
            modified_dr,
            incoming_attack: memory
                .incoming_attack
                .clone()
                .unwrap_or_else(|| config.default_incoming_attack.clone()),
        }
    }

    /// Modified DR for an edited base DR.
    pub fn modified_for(&self, base_dr: i32) -> i32 {
        base_dr.saturating_add(DrModifier::total(&self.dr_modifiers))
    }

    pub fn accept(&self) -> DefendForm {
        DefendForm {
            base_dr: Some(self.base_dr),
            modified_dr: Some(self.modified_dr),
            incoming_attack: Some(self.incoming_attack.clone()),
        }
    }
}

/// Attack form as submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackForm {
    pub item: Option<ItemId>,
    pub attack_dr: Option<i32>,
    pub target_armor: Option<String>,
}

/// Validated attack parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackInput {
    pub item: ItemId,
    pub attack_dr: i32,
    /// Formula rolled for the target's armor, if it wears any.
    pub target_armor: Option<String>,
}

impl AttackForm {
    pub fn validate(self) -> Result<AttackInput, InputError> {
        let item = self.item.ok_or(InputError::MissingItem)?;
        let attack_dr = positive_dr(self.attack_dr)?;
        Ok(AttackInput {
            item,
            attack_dr,
            target_armor: non_blank(self.target_armor),
        })
    }
}

/// Defend form as submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendForm {
    pub base_dr: Option<i32>,
    pub modified_dr: Option<i32>,
    pub incoming_attack: Option<String>,
}

/// Validated defend parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefendInput {
    /// DR as entered; remembered for the next defence.
    pub base_dr: i32,
    /// DR the defence roll is compared against.
    pub modified_dr: i32,
    pub incoming_attack: String,
}

impl DefendForm {
    pub fn validate(self) -> Result<DefendInput, InputError> {
        let base_dr = positive_dr(self.base_dr)?;
        let modified_dr = positive_dr(self.modified_dr)?;
        let incoming_attack =
            non_blank(self.incoming_attack).ok_or(InputError::MissingFormula("incoming attack"))?;
        Ok(DefendInput {
            base_dr,
            modified_dr,
            incoming_attack,
        })
    }
}

fn positive_dr(dr: Option<i32>) -> Result<i32, InputError> {
    dr.filter(|dr| *dr > 0).ok_or(InputError::MissingDr)
}

fn non_blank(formula: Option<String>) -> Option<String> {
    formula
        .map(|formula| formula.trim().to_string())
        .filter(|formula| !formula.is_empty())
}

/// Length of a rest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RestLength {
    Short,
    Long,
}

/// What the character eats during a rest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Food {
    Eat,
    #[strum(to_string = "dont_eat", serialize = "donteat")]
    DontEat,
    Starve,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Abilities, CharacterId, Item, WeaponType};

    #[test]
    fn attack_prompt_prefers_remembered_values() {
        let character = Character::new(CharacterId(1), "Sarkash", Abilities::default(), 6)
            .with_item(Item::weapon(ItemId(4), "Femur", "1d4", WeaponType::Melee))
            .with_item(Item::helmet(ItemId(5), "Pot"));
        let config = RulesConfig::default();

        let fresh = AttackPrompt::new(&character, Some(ItemId(4)), &InputMemory::new(), &config);
        assert_eq!(fresh.attack_dr, 12);
        assert_eq!(fresh.weapons.len(), 1);

        let memory = InputMemory {
            attack_dr: Some(14),
            target_armor: Some("1d2".into()),
            ..InputMemory::default()
        };
        let remembered = AttackPrompt::new(&character, Some(ItemId(4)), &memory, &config);
        let input = remembered.accept().validate().unwrap();
        assert_eq!(input.attack_dr, 14);
        assert_eq!(input.target_armor.as_deref(), Some("1d2"));
    }

    #[test]
    fn attack_form_requires_item_and_positive_dr() {
        let form = AttackForm {
            item: None,
            attack_dr: Some(12),
            target_armor: None,
        };
        assert_eq!(form.validate(), Err(InputError::MissingItem));

        let form = AttackForm {
            item: Some(ItemId(1)),
            attack_dr: Some(0),
            target_armor: Some("  ".into()),
        };
        assert_eq!(form.validate(), Err(InputError::MissingDr));
    }

    #[test]
    fn defend_form_requires_incoming_attack() {
        let form = DefendForm {
            base_dr: Some(12),
            modified_dr: Some(14),
            incoming_attack: Some(String::new()),
        };
        assert_eq!(
            form.validate(),
            Err(InputError::MissingFormula("incoming attack"))
        );
    }

    #[test]
    fn defend_prompt_defaults_and_modifiers() {
        let prompt = DefendPrompt::new(
            &InputMemory::new(),
            vec![DrModifier::encumbered(2)],
            &RulesConfig::default(),
        );
        assert_eq!(prompt.base_dr, 12);
        assert_eq!(prompt.modified_dr, 14);
        assert_eq!(prompt.incoming_attack, "1d4");
        assert_eq!(prompt.modified_for(10), 12);
    }

    #[test]
    fn food_accepts_both_spellings() {
        assert_eq!("donteat".parse::<Food>(), Ok(Food::DontEat));
        assert_eq!("dont_eat".parse::<Food>(), Ok(Food::DontEat));
        assert_eq!(Food::DontEat.to_string(), "dont_eat");
    }
}
