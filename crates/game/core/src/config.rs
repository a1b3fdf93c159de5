/// Tunable rule parameters.
///
/// Defaults match the printed rules; hosts override them from `rules.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Attack DR offered when the attacker has not entered one yet.
    pub default_attack_dr: i32,
    /// Defend DR offered when the defender has not entered one yet.
    pub default_defend_dr: i32,
    /// Incoming-attack formula offered on the first defence.
    pub default_incoming_attack: String,
    /// DR of the presence test made when activating a tribute.
    pub tribute_dr: i32,
    /// DR penalty applied while encumbered.
    pub encumbrance_penalty: i32,
    /// Carrying capacity before strength is added.
    pub base_capacity: i32,
}

impl RulesConfig {
    // ===== printed-rule defaults =====
    pub const DEFAULT_DR: i32 = 12;
    pub const DEFAULT_INCOMING_ATTACK: &'static str = "1d4";
    pub const DEFAULT_ENCUMBRANCE_PENALTY: i32 = 2;
    pub const DEFAULT_BASE_CAPACITY: i32 = 8;

    pub fn new() -> Self {
        Self {
            default_attack_dr: Self::DEFAULT_DR,
            default_defend_dr: Self::DEFAULT_DR,
            default_incoming_attack: Self::DEFAULT_INCOMING_ATTACK.to_string(),
            tribute_dr: Self::DEFAULT_DR,
            encumbrance_penalty: Self::DEFAULT_ENCUMBRANCE_PENALTY,
            base_capacity: Self::DEFAULT_BASE_CAPACITY,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
