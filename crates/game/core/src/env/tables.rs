use std::collections::BTreeMap;

/// Oracle providing rule tables.
pub trait TablesOracle: Send + Sync {
    /// Armor properties for a tier index, or `None` if the table has no such tier.
    fn armor_tier(&self, tier: u8) -> Option<ArmorTier>;
}

/// Properties of one armor tier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorTier {
    /// DR penalty on agility tests.
    pub agility_modifier: i32,
    /// DR penalty on defence.
    pub defense_modifier: i32,
    /// Die rolled to reduce incoming damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_reduction_die: Option<String>,
}

impl ArmorTier {
    pub fn new(
        agility_modifier: i32,
        defense_modifier: i32,
        damage_reduction_die: Option<&str>,
    ) -> Self {
        Self {
            agility_modifier,
            defense_modifier,
            damage_reduction_die: damage_reduction_die.map(str::to_string),
        }
    }
}

/// Tier index to armor properties.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ArmorTierTable {
    tiers: BTreeMap<u8, ArmorTier>,
}

impl ArmorTierTable {
    pub fn new(tiers: impl IntoIterator<Item = (u8, ArmorTier)>) -> Self {
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }

    pub fn get(&self, tier: u8) -> Option<&ArmorTier> {
        self.tiers.get(&tier)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for ArmorTierTable {
    /// The printed tier table: unarmored, light, medium, heavy.
    fn default() -> Self {
        Self::new([
            (0, ArmorTier::new(0, 0, None)),
            (1, ArmorTier::new(0, 0, Some("1d2"))),
            (2, ArmorTier::new(2, 2, Some("1d4"))),
            (3, ArmorTier::new(4, 2, Some("1d6"))),
        ])
    }
}

impl TablesOracle for ArmorTierTable {
    fn armor_tier(&self, tier: u8) -> Option<ArmorTier> {
        self.get(tier).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_printed_tiers() {
        let table = ArmorTierTable::default();
        assert_eq!(table.len(), 4);
        assert_eq!(table.armor_tier(0), Some(ArmorTier::new(0, 0, None)));
        assert_eq!(
            table.armor_tier(3).and_then(|tier| tier.damage_reduction_die),
            Some("1d6".to_string())
        );
        assert_eq!(table.armor_tier(4), None);
    }
}
