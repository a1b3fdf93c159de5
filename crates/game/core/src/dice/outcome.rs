/// Faces drawn for one `NdM` term.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieTerm {
    pub sides: u32,
    pub results: Vec<u32>,
}

impl DieTerm {
    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn sum(&self) -> i64 {
        self.results.iter().map(|&face| i64::from(face)).sum()
    }
}

/// One evaluated term of a formula, in evaluation order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermResult {
    Dice(DieTerm),
    Constant(i32),
}

/// Result of evaluating a formula.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollOutcome {
    /// Formula as written, before substitution.
    pub formula: String,
    pub total: i32,
    pub terms: Vec<TermResult>,
}

impl RollOutcome {
    /// Natural face of a leading d20, if the formula starts with one.
    pub fn natural_d20(&self) -> Option<u32> {
        match self.terms.first() {
            Some(TermResult::Dice(term)) if term.sides == 20 => term.results.first().copied(),
            _ => None,
        }
    }

    pub fn is_crit(&self) -> bool {
        self.natural_d20() == Some(20)
    }

    pub fn is_fumble(&self) -> bool {
        self.natural_d20() == Some(1)
    }

    /// Every face drawn, in draw order.
    pub fn faces(&self) -> impl Iterator<Item = u32> + '_ {
        self.terms
            .iter()
            .filter_map(|term| match term {
                TermResult::Dice(dice) => Some(dice.results.iter().copied()),
                TermResult::Constant(_) => None,
            })
            .flatten()
    }
}
