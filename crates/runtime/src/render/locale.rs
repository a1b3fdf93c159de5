/// Looks up display text for a label key.
pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

/// Built-in English labels. Unknown keys are echoed back unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishLocalizer;

const ENGLISH: &[(&str, &str)] = &[
    ("ability.strength", "Strength"),
    ("ability.agility", "Agility"),
    ("ability.presence", "Presence"),
    ("ability.toughness", "Toughness"),
    ("weapon.melee", "Melee"),
    ("weapon.ranged", "Ranged"),
    ("attack.critical", "Critical hit!"),
    ("attack.hit", "Hit"),
    ("attack.fumble", "Fumble!"),
    ("attack.miss", "Miss"),
    ("defend.critical", "Critical defence!"),
    ("defend.dodge", "Dodge"),
    ("defend.fumble", "Fumble!"),
    ("defend.hit", "Hit"),
    ("morale.stands_firm", "Stands firm"),
    ("morale.flees", "Flees"),
    ("morale.surrenders", "Surrenders"),
    ("reaction.kill", "Kill!"),
    ("reaction.angered", "Angered"),
    ("reaction.indifferent", "Indifferent"),
    ("reaction.almost_friendly", "Almost friendly"),
    ("reaction.helpful", "Helpful"),
    ("tribute.critical", "Critical success"),
    ("tribute.success", "Success"),
    ("tribute.fumble", "Fumble, the tribute is lost for the day"),
    ("tribute.failure", "Failure, you are dizzy"),
    ("broken.unconscious", "Unconscious"),
    ("broken.severed_limb", "Severed limb"),
    ("broken.lost_eye", "Lost eye"),
    ("broken.hemorrhage", "Hemorrhage"),
    ("broken.dead", "Dead"),
    ("broken.all_tests", "all tests"),
    ("broken.permanently", "permanently"),
    ("stat.hp", "HP"),
    ("card.test", "Test"),
    ("card.attack", "Attack"),
    ("card.defend", "Defend"),
    ("card.morale", "Morale"),
    ("card.reaction", "Reaction"),
    ("card.tribute", "Tribute"),
    ("card.broken", "Broken"),
    ("card.improve", "Improve"),
    ("card.dr", "DR"),
    ("card.damage", "damage"),
    ("card.armor", "Armor"),
    ("card.inflict", "Inflict"),
    ("card.take", "Take"),
    ("card.gain", "Gain"),
    ("card.lose", "Lose"),
    ("card.unchanged", "unchanged"),
    ("card.rounds", "rounds"),
    ("card.hours", "hours"),
    ("card.hour", "Hour"),
    ("card.remaining", "remaining"),
    ("card.no_effect", "No effect"),
    ("dr.encumbered", "Encumbered"),
    ("outcome.favors", "Favors"),
    ("outcome.neuromancy_points_per_day", "Neuromancy points per day"),
    ("outcome.rest", "Rest"),
    ("outcome.starvation", "Starvation"),
    ("outcome.infection", "Infection"),
    ("rest.short", "Short rest"),
    ("rest.long", "Long rest"),
    ("resource.favors", "favors"),
    ("resource.neuromancy_points", "neuromancy points"),
    ("warning.neuromancy_points", "No neuromancy points left"),
];

impl Localizer for EnglishLocalizer {
    fn localize(&self, key: &str) -> String {
        ENGLISH
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(key, |(_, text)| *text)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_echo_back() {
        assert_eq!(EnglishLocalizer.localize("ability.agility"), "Agility");
        assert_eq!(EnglishLocalizer.localize("ability.luck"), "ability.luck");
    }
}
