use std::sync::Mutex;

use async_trait::async_trait;

use super::{DiceError, DiceExpression, DiceSource, RollContext, RollOutcome};

/// Evaluates formulas and shows their outcomes.
///
/// Resolvers await [`display`](DiceService::display) before an outcome feeds
/// a dependent calculation. Independent rolls go through
/// [`display_both`](DiceService::display_both) and are awaited jointly.
#[async_trait]
pub trait DiceService: Send + Sync {
    fn evaluate(&self, formula: &str, ctx: &RollContext) -> Result<RollOutcome, DiceError>;

    /// Visualization hook; completes once the roll has been shown.
    async fn display(&self, outcome: &RollOutcome);

    async fn display_both(&self, first: &RollOutcome, second: Option<&RollOutcome>) {
        match second {
            Some(second) => {
                futures::future::join(self.display(first), self.display(second)).await;
            }
            None => self.display(first).await,
        }
    }
}

/// Dice service over a [`DiceSource`], with nothing to show.
#[derive(Debug)]
pub struct Dice<S> {
    source: Mutex<S>,
}

impl<S: DiceSource> Dice<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Mutex::new(source),
        }
    }

    pub fn into_inner(self) -> Result<S, DiceError> {
        self.source
            .into_inner()
            .map_err(|_| DiceError::SourceUnavailable)
    }
}

#[async_trait]
impl<S: DiceSource> DiceService for Dice<S> {
    fn evaluate(&self, formula: &str, ctx: &RollContext) -> Result<RollOutcome, DiceError> {
        let expression = DiceExpression::parse(formula)?;
        let mut source = self
            .source
            .lock()
            .map_err(|_| DiceError::SourceUnavailable)?;
        expression.evaluate(ctx, &mut *source)
    }

    async fn display(&self, _outcome: &RollOutcome) {}
}
