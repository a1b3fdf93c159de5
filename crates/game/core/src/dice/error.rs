use crate::error::{ErrorSeverity, GameError};

/// Errors raised while parsing or evaluating a dice formula.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("formula is empty")]
    EmptyFormula,

    #[error("unexpected character '{found}' at position {position} in '{formula}'")]
    UnexpectedChar {
        formula: String,
        position: usize,
        found: char,
    },

    #[error("unexpected token at position {position} in '{formula}'")]
    UnexpectedToken { formula: String, position: usize },

    #[error("formula '{formula}' ended unexpectedly")]
    UnexpectedEnd { formula: String },

    #[error("invalid dice {count}d{sides}")]
    InvalidDice { count: u64, sides: u64 },

    #[error("unknown variable @{0}")]
    UnknownVariable(String),

    #[error("substitution of @{0} nests too deeply")]
    RecursionLimit(String),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("dice source has no faces left")]
    SourceExhausted,

    #[error("scripted face {face} does not fit a d{sides}")]
    FaceOutOfRange { face: u32, sides: u32 },

    #[error("dice source unavailable")]
    SourceUnavailable,
}

impl GameError for DiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyFormula
            | Self::UnexpectedChar { .. }
            | Self::UnexpectedToken { .. }
            | Self::UnexpectedEnd { .. }
            | Self::InvalidDice { .. }
            | Self::UnknownVariable(_)
            | Self::RecursionLimit(_)
            | Self::Overflow => ErrorSeverity::Validation,
            Self::SourceExhausted | Self::FaceOutOfRange { .. } => ErrorSeverity::Internal,
            Self::SourceUnavailable => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyFormula => "DICE_EMPTY_FORMULA",
            Self::UnexpectedChar { .. } => "DICE_UNEXPECTED_CHAR",
            Self::UnexpectedToken { .. } => "DICE_UNEXPECTED_TOKEN",
            Self::UnexpectedEnd { .. } => "DICE_UNEXPECTED_END",
            Self::InvalidDice { .. } => "DICE_INVALID_DICE",
            Self::UnknownVariable(_) => "DICE_UNKNOWN_VARIABLE",
            Self::RecursionLimit(_) => "DICE_RECURSION_LIMIT",
            Self::Overflow => "DICE_OVERFLOW",
            Self::SourceExhausted => "DICE_SOURCE_EXHAUSTED",
            Self::FaceOutOfRange { .. } => "DICE_FACE_OUT_OF_RANGE",
            Self::SourceUnavailable => "DICE_SOURCE_UNAVAILABLE",
        }
    }
}
