use super::parse::{self, BinaryOp, Expr};
use super::{DiceError, DiceSource, DieTerm, RollContext, RollOutcome, RollValue, TermResult};

/// Most dice a single term may roll.
pub const MAX_DICE: u32 = 100;

/// Most sides a single die may have.
pub const MAX_SIDES: u32 = 1000;

/// How deep formula-valued variables may nest before evaluation gives up.
pub const MAX_SUBSTITUTION_DEPTH: usize = 8;

/// A parsed dice formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceExpression {
    formula: String,
    expr: Expr,
}

impl DiceExpression {
    pub fn parse(formula: &str) -> Result<Self, DiceError> {
        Ok(Self {
            formula: formula.to_string(),
            expr: parse::parse(formula)?,
        })
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Evaluates the formula, drawing faces from `source` left to right.
    ///
    /// `@path` references resolve against `ctx`. A formula-valued reference is
    /// parsed and evaluated in place as a group, its terms appended to the
    /// outcome where the reference appears.
    pub fn evaluate<S>(&self, ctx: &RollContext, source: &mut S) -> Result<RollOutcome, DiceError>
    where
        S: DiceSource + ?Sized,
    {
        let mut evaluator = Evaluator {
            ctx,
            source,
            terms: Vec::new(),
            depth: 0,
        };
        let total = evaluator.eval(&self.expr)?;
        Ok(RollOutcome {
            formula: self.formula.clone(),
            total,
            terms: evaluator.terms,
        })
    }
}

struct Evaluator<'a, S: ?Sized> {
    ctx: &'a RollContext,
    source: &'a mut S,
    terms: Vec<TermResult>,
    depth: usize,
}

impl<S: DiceSource + ?Sized> Evaluator<'_, S> {
    fn eval(&mut self, expr: &Expr) -> Result<i32, DiceError> {
        match expr {
            Expr::Number(value) => {
                self.terms.push(TermResult::Constant(*value));
                Ok(*value)
            }
            Expr::Dice { count, sides } => {
                let mut results = Vec::with_capacity(*count as usize);
                for _ in 0..*count {
                    results.push(self.source.draw(*sides)?);
                }
                let term = DieTerm {
                    sides: *sides,
                    results,
                };
                let sum = i32::try_from(term.sum()).map_err(|_| DiceError::Overflow)?;
                self.terms.push(TermResult::Dice(term));
                Ok(sum)
            }
            Expr::Var(path) => self.substitute(path),
            Expr::Neg(inner) => self.eval(inner)?.checked_neg().ok_or(DiceError::Overflow),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                match op {
                    BinaryOp::Add => lhs.checked_add(rhs),
                    BinaryOp::Sub => lhs.checked_sub(rhs),
                    BinaryOp::Mul => lhs.checked_mul(rhs),
                }
                .ok_or(DiceError::Overflow)
            }
        }
    }

    fn substitute(&mut self, path: &str) -> Result<i32, DiceError> {
        match self.ctx.get(path) {
            None => Err(DiceError::UnknownVariable(path.to_string())),
            Some(RollValue::Int(value)) => {
                self.terms.push(TermResult::Constant(*value));
                Ok(*value)
            }
            Some(RollValue::Formula(formula)) => {
                if self.depth >= MAX_SUBSTITUTION_DEPTH {
                    return Err(DiceError::RecursionLimit(path.to_string()));
                }
                let nested = parse::parse(formula)?;
                self.depth += 1;
                let value = self.eval(&nested);
                self.depth -= 1;
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    fn roll(formula: &str, ctx: &RollContext, faces: &[u32]) -> Result<RollOutcome, DiceError> {
        let mut dice = ScriptedDice::new(faces.iter().copied());
        DiceExpression::parse(formula)?.evaluate(ctx, &mut dice)
    }

    #[test]
    fn ability_test_adds_the_bound_value() {
        let ctx = RollContext::with("abilities.strength.value", 2);
        let outcome = roll("d20+@abilities.strength.value", &ctx, &[15]).unwrap();
        assert_eq!(outcome.total, 17);
        assert_eq!(outcome.natural_d20(), Some(15));
        assert_eq!(outcome.formula, "d20+@abilities.strength.value");
    }

    #[test]
    fn formula_variables_evaluate_as_a_group() {
        let ctx = RollContext::with("damageDie", RollValue::formula("1d6+1"));
        let outcome = roll("@damageDie * 2", &ctx, &[4]).unwrap();
        assert_eq!(outcome.total, 10);
        assert_eq!(outcome.faces().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn draws_left_to_right() {
        let outcome = roll("2d6 - 1d4 + 3", &RollContext::new(), &[6, 2, 3]).unwrap();
        assert_eq!(outcome.total, 8);
        assert_eq!(outcome.faces().collect::<Vec<_>>(), vec![6, 2, 3]);
        assert_eq!(outcome.terms.len(), 3);
    }

    #[test]
    fn unknown_variable_names_the_path() {
        let err = roll("@favorDie", &RollContext::new(), &[]).unwrap_err();
        assert_eq!(err, DiceError::UnknownVariable("favorDie".into()));
    }

    #[test]
    fn self_referencing_formula_hits_the_depth_limit() {
        let ctx = RollContext::with("loop", RollValue::formula("1+@loop"));
        let err = roll("@loop", &ctx, &[]).unwrap_err();
        assert_eq!(err, DiceError::RecursionLimit("loop".into()));
    }

    #[test]
    fn overflow_is_reported() {
        let err = roll("2147483647 + 1", &RollContext::new(), &[]).unwrap_err();
        assert_eq!(err, DiceError::Overflow);
    }

    #[test]
    fn running_out_of_faces_aborts() {
        let err = roll("2d6", &RollContext::new(), &[3]).unwrap_err();
        assert_eq!(err, DiceError::SourceExhausted);
    }

    #[test]
    fn same_draws_give_same_outcome() {
        let ctx = RollContext::with("abilities.agility.value", -1);
        let first = roll("1d20+@abilities.agility.value", &ctx, &[9]).unwrap();
        let second = roll("1d20+@abilities.agility.value", &ctx, &[9]).unwrap();
        assert_eq!(first, second);
    }
}
