//! Table lookups: reaction, morale, and broken.
//!
//! Classification functions are pure and take roll totals; the resolvers
//! sequence the rolls.
mod broken;
mod morale;
mod reaction;

pub use broken::BrokenOutcome;
pub use morale::MoraleOutcome;
pub use reaction::Reaction;
