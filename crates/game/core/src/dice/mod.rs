//! Dice expressions and the sources that feed them.
//!
//! A formula such as `1d20+@abilities.strength.value` is parsed into a
//! [`DiceExpression`], then evaluated against a [`RollContext`] while drawing
//! faces from a [`DiceSource`]. The result is a [`RollOutcome`] holding every
//! face drawn, which resolvers hand to a [`DiceService`] for display before
//! using it.
//!
//! # Determinism
//!
//! Evaluation draws exactly the dice named by the formula, left to right.
//! The same formula, context and draws always produce the same outcome, so a
//! [`ScriptedDice`] recording replays an action exactly.
mod context;
mod error;
mod expression;
mod outcome;
mod parse;
mod service;
mod source;

pub use context::{RollContext, RollValue};
pub use error::DiceError;
pub use expression::{DiceExpression, MAX_DICE, MAX_SIDES, MAX_SUBSTITUTION_DEPTH};
pub use outcome::{DieTerm, RollOutcome, TermResult};
pub use service::{Dice, DiceService};
pub use source::{DiceSource, PcgDice, ScriptedDice};
