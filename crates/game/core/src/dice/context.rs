use std::collections::BTreeMap;

/// Value bound to a `@path` reference.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollValue {
    Int(i32),
    /// A nested formula, evaluated in place as a parenthesised group.
    Formula(String),
}

impl RollValue {
    pub fn formula(formula: impl Into<String>) -> Self {
        Self::Formula(formula.into())
    }
}

impl From<i32> for RollValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

/// Dotted-path variables available to a formula.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollContext {
    values: BTreeMap<String, RollValue>,
}

impl RollContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with a single binding.
    pub fn with(path: impl Into<String>, value: impl Into<RollValue>) -> Self {
        let mut ctx = Self::new();
        ctx.insert(path, value);
        ctx
    }

    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<RollValue>) {
        self.values.insert(path.into(), value.into());
    }

    pub fn get(&self, path: &str) -> Option<&RollValue> {
        self.values.get(path)
    }

    /// Copies every binding of `other` into this context, replacing clashes.
    pub fn extend(&mut self, other: RollContext) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
