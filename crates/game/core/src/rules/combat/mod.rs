//! Attack and defence exchanges.
//!
//! Both follow the same shape: one d20 roll against a DR, displayed before
//! anything else happens, then on a damaging outcome a damage roll and an
//! armor roll that are displayed together.
mod attack;
mod defend;

pub use attack::AttackOutcome;
pub use defend::DefendOutcome;

/// Damage left after armor, never negative.
pub(crate) fn reduced_damage(damage: i32, reduction: Option<i32>) -> i32 {
    damage.saturating_sub(reduction.unwrap_or(0)).max(0)
}
