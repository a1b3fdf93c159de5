//! Dice sources and the displaying dice service hosts run with.

use std::time::Duration;

use async_trait::async_trait;
use grimm_core::{Dice, DiceError, DiceService, DiceSource, RollContext, RollOutcome};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::events::{DiceEvent, Event, EventBus};

/// Dice source backed by a ChaCha stream.
///
/// Seeded sources replay the same faces for the same sequence of draws.
#[derive(Clone, Debug)]
pub struct RandDice {
    rng: ChaCha8Rng,
}

impl RandDice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl DiceSource for RandDice {
    fn draw(&mut self, sides: u32) -> Result<u32, DiceError> {
        if sides == 0 {
            return Err(DiceError::InvalidDice { count: 1, sides: 0 });
        }
        Ok(self.rng.gen_range(1..=sides))
    }
}

/// Dice service that announces every displayed roll on the event bus.
///
/// `display` resolves after the configured delay, standing in for a dice
/// animation the caller must wait on before dependent rolls.
pub struct DisplayedDice<S> {
    dice: Dice<S>,
    bus: Option<EventBus>,
    delay: Duration,
}

impl<S: DiceSource> DisplayedDice<S> {
    pub fn new(source: S) -> Self {
        Self {
            dice: Dice::new(source),
            bus: None,
            delay: Duration::ZERO,
        }
    }

    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn into_source(self) -> Result<S, DiceError> {
        self.dice.into_inner()
    }
}

#[async_trait]
impl<S: DiceSource> DiceService for DisplayedDice<S> {
    fn evaluate(&self, formula: &str, ctx: &RollContext) -> Result<RollOutcome, DiceError> {
        let outcome = self.dice.evaluate(formula, ctx)?;
        tracing::debug!(formula, total = outcome.total, "rolled");
        Ok(outcome)
    }

    async fn display(&self, outcome: &RollOutcome) {
        if let Some(bus) = &self.bus {
            bus.publish(Event::Dice(DiceEvent::Shown {
                outcome: outcome.clone(),
            }));
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use grimm_core::ScriptedDice;

    use super::*;
    use crate::events::Topic;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RandDice::seeded(7);
        let mut b = RandDice::seeded(7);
        for _ in 0..100 {
            let face = a.draw(20).unwrap();
            assert!((1..=20).contains(&face));
            assert_eq!(face, b.draw(20).unwrap());
        }
        assert!(a.draw(0).is_err());
    }

    #[tokio::test]
    async fn display_publishes_the_outcome() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Topic::Dice);
        let dice = DisplayedDice::new(ScriptedDice::new([5])).with_bus(bus);

        let outcome = dice.evaluate("1d6+1", &RollContext::new()).unwrap();
        dice.display(&outcome).await;

        match rx.recv().await.unwrap() {
            Event::Dice(DiceEvent::Shown { outcome }) => assert_eq!(outcome.total, 6),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
