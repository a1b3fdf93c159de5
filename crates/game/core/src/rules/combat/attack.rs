use crate::character::{AbilityKind, Character, ItemId, ItemType, WeaponType};
use crate::dice::RollContext;
use crate::error::RuleError;
use crate::input::{AttackInput, AttackPrompt, InputError, InputMemory};
use crate::report::{AttackReport, ItemRef, Report};
use crate::rules::{Resolution, RulesEngine};

use super::reduced_damage;

/// Outcome of an attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    /// Natural 20 that met the DR; damage is doubled.
    CriticalHit,
    Hit,
    /// Natural 1 that missed.
    Fumble,
    Miss,
}

impl AttackOutcome {
    pub fn classify(total: i32, attack_dr: i32, is_crit: bool, is_fumble: bool) -> Self {
        match (total >= attack_dr, is_crit, is_fumble) {
            (true, true, _) => Self::CriticalHit,
            (true, false, _) => Self::Hit,
            (false, _, true) => Self::Fumble,
            (false, _, false) => Self::Miss,
        }
    }

    pub const fn is_hit(self) -> bool {
        matches!(self, Self::CriticalHit | Self::Hit)
    }

    pub const fn label_key(self) -> &'static str {
        match self {
            Self::CriticalHit => "attack.critical",
            Self::Hit => "attack.hit",
            Self::Fumble => "attack.fumble",
            Self::Miss => "attack.miss",
        }
    }
}

/// Ability an attack with this weapon is rolled with.
pub fn attack_ability(weapon_type: WeaponType) -> AbilityKind {
    match weapon_type {
        WeaponType::Ranged => AbilityKind::Presence,
        WeaponType::Melee => AbilityKind::Strength,
    }
}

impl RulesEngine<'_> {
    /// Prefilled attack form for a character.
    pub fn attack_prompt(
        &self,
        character: &Character,
        item: Option<ItemId>,
        memory: &InputMemory,
    ) -> AttackPrompt {
        AttackPrompt::new(character, item, memory, self.config)
    }

    /// Attacks with a weapon against a DR.
    ///
    /// On a hit the weapon's damage die is rolled (doubled on a critical) and
    /// the target's armor formula, if given, is rolled to reduce it. The
    /// damage is only reported; the target is not a tracked character.
    pub async fn attack(
        &self,
        character: &Character,
        input: &AttackInput,
    ) -> Result<Resolution, RuleError> {
        let weapon = character
            .item(input.item)
            .ok_or(InputError::ItemNotFound(input.item))?;
        if weapon.item_type != ItemType::Weapon {
            return Err(InputError::NotAWeapon(input.item).into());
        }
        let weapon_type = weapon.weapon_type();
        let ability = attack_ability(weapon_type);

        let attack_roll = self
            .roll_for(character, &format!("d20+@{}", ability.roll_path()))
            .await?;
        let outcome = AttackOutcome::classify(
            attack_roll.total,
            input.attack_dr,
            attack_roll.is_crit(),
            attack_roll.is_fumble(),
        );

        let mut damage_roll = None;
        let mut target_armor_roll = None;
        let mut damage = None;
        if outcome.is_hit() {
            let formula = match outcome {
                AttackOutcome::CriticalHit => "@damageDie * 2",
                _ => "@damageDie",
            };
            let rolled = self.evaluate(formula, &weapon.roll_context())?;
            let armor = match &input.target_armor {
                Some(formula) => Some(self.evaluate(formula, &RollContext::new())?),
                None => None,
            };
            self.dice.display_both(&rolled, armor.as_ref()).await;

            damage = Some(reduced_damage(
                rolled.total,
                armor.as_ref().map(|roll| roll.total),
            ));
            damage_roll = Some(rolled);
            target_armor_roll = armor;
        }

        Ok(Resolution::report_only(Report::Attack(AttackReport {
            weapon: ItemRef {
                id: weapon.id,
                name: weapon.name.clone(),
            },
            weapon_type,
            attack_dr: input.attack_dr,
            attack_roll,
            outcome,
            damage_roll,
            target_armor_roll,
            damage,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Item;
    use crate::dice::DiceError;
    use crate::rules::testing::{Fixture, hero};

    fn input(item: u32, target_armor: Option<&str>) -> AttackInput {
        AttackInput {
            item: ItemId(item),
            attack_dr: 12,
            target_armor: target_armor.map(str::to_string),
        }
    }

    async fn attack(faces: &[u32], input: AttackInput) -> (Result<Resolution, RuleError>, usize) {
        let fixture = Fixture::new(faces.iter().copied());
        let result = fixture.engine().attack(&hero(), &input).await;
        (result, fixture.remaining())
    }

    fn report(resolution: Resolution) -> AttackReport {
        match resolution.report {
            Report::Attack(report) => report,
            other => panic!("expected attack report, got {other:?}"),
        }
    }

    #[test]
    fn classification_covers_all_outcomes() {
        assert_eq!(AttackOutcome::classify(22, 12, true, false), AttackOutcome::CriticalHit);
        assert_eq!(AttackOutcome::classify(12, 12, false, false), AttackOutcome::Hit);
        assert_eq!(AttackOutcome::classify(3, 12, false, true), AttackOutcome::Fumble);
        assert_eq!(AttackOutcome::classify(11, 12, false, false), AttackOutcome::Miss);
        assert_eq!(AttackOutcome::classify(13, 12, false, true), AttackOutcome::Hit);
    }

    #[tokio::test]
    async fn hit_subtracts_target_armor() {
        let (result, remaining) = attack(&[15, 5, 2], input(1, Some("1d4"))).await;
        let report = report(result.unwrap());
        assert_eq!(report.attack_roll.total, 17);
        assert_eq!(report.outcome, AttackOutcome::Hit);
        assert_eq!(report.damage, Some(3));
        assert_eq!(report.target_armor_roll.map(|roll| roll.total), Some(2));
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn natural_one_misses_without_damage_roll() {
        let (result, remaining) = attack(&[1, 6], input(1, None)).await;
        let report = report(result.unwrap());
        assert_eq!(report.outcome, AttackOutcome::Fumble);
        assert_eq!(report.damage, None);
        assert!(report.damage_roll.is_none());
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn critical_doubles_damage_and_floors_at_zero() {
        let (result, _) = attack(&[20, 1, 6], input(1, Some("1d6"))).await;
        let report = report(result.unwrap());
        assert_eq!(report.outcome, AttackOutcome::CriticalHit);
        assert_eq!(report.damage_roll.map(|roll| roll.total), Some(2));
        assert_eq!(report.damage, Some(0));
    }

    #[tokio::test]
    async fn ranged_weapons_use_presence() {
        let (result, _) = attack(&[12, 3], input(2, None)).await;
        let report = report(result.unwrap());
        assert_eq!(report.weapon_type, WeaponType::Ranged);
        assert_eq!(report.attack_roll.total, 12);
        assert_eq!(report.damage, Some(3));
    }

    #[tokio::test]
    async fn non_weapons_are_rejected_before_rolling() {
        let fixture = Fixture::new([15]);
        let character = hero().with_item(Item::helmet(ItemId(7), "Helm"));
        let err = fixture
            .engine()
            .attack(&character, &input(7, None))
            .await
            .unwrap_err();
        assert_eq!(err, RuleError::Input(InputError::NotAWeapon(ItemId(7))));
        assert_eq!(fixture.remaining(), 1);
    }

    #[tokio::test]
    async fn weapon_without_damage_die_aborts() {
        let fixture = Fixture::new([15]);
        let character = hero().with_item(Item::new(ItemId(8), "Stick", ItemType::Weapon));
        let err = fixture
            .engine()
            .attack(&character, &input(8, None))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::Dice(DiceError::UnknownVariable("damageDie".into()))
        );
    }
}
