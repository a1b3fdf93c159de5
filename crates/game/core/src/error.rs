//! Common error infrastructure for grimm-core.
//!
//! Domain-specific errors (`DiceError`, `InputError`) live next to the code
//! that raises them. [`RuleError`] is the umbrella returned by every resolver
//! in [`crate::rules`].
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Abort Semantics**: Any error aborts the whole action; no partial report
//!   and no state change is ever produced alongside an error

use crate::character::ItemId;
use crate::dice::DiceError;
use crate::input::InputError;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The action may succeed later (e.g. after a rest restores a resource)
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted character data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry once the character state changes.
    ///
    /// Examples: no neuromancy points left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: no weapon selected, DR missing, unknown formula variable
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: dice source lock poisoned
    Internal,

    /// Fatal error - character data is corrupted, cannot continue.
    ///
    /// Examples: armor tier outside the tier table
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all grimm-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Resource pools that gate special actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    NeuromancyPoints,
}

/// Errors surfaced by the rule engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Required action parameter missing or invalid; raised before any roll.
    #[error(transparent)]
    Input(#[from] InputError),

    /// A dice formula failed to parse or evaluate; the action is discarded.
    #[error(transparent)]
    Dice(#[from] DiceError),

    /// A resource-gated action was invoked with the resource at zero.
    #[error("no {resource} remaining")]
    ResourceExhausted { resource: Resource },

    /// Armor references a tier index missing from the tier table.
    #[error("armor {item} references unknown tier {tier}")]
    UnknownArmorTier { item: ItemId, tier: u8 },
}

impl GameError for RuleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Input(err) => err.severity(),
            Self::Dice(err) => err.severity(),
            Self::ResourceExhausted { .. } => ErrorSeverity::Recoverable,
            Self::UnknownArmorTier { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(err) => err.error_code(),
            Self::Dice(err) => err.error_code(),
            Self::ResourceExhausted { .. } => "RULE_RESOURCE_EXHAUSTED",
            Self::UnknownArmorTier { .. } => "RULE_UNKNOWN_ARMOR_TIER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_delegates_to_wrapped_errors() {
        let err = RuleError::from(DiceError::UnknownVariable("damageDie".into()));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "DICE_UNKNOWN_VARIABLE");

        let err = RuleError::ResourceExhausted {
            resource: Resource::NeuromancyPoints,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.to_string(), "no neuromancy_points remaining");
    }

    #[test]
    fn unknown_tier_is_fatal() {
        let err = RuleError::UnknownArmorTier {
            item: ItemId(3),
            tier: 9,
        };
        assert!(err.severity().is_internal());
        assert_eq!(err.to_string(), "armor #3 references unknown tier 9");
    }
}
