//! Tokenizer and recursive-descent parser for dice formulas.
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary ('*' unary)*
//! unary   := '-' unary | atom
//! atom    := NUMBER ['d' NUMBER] | 'd' NUMBER | '@' PATH | '(' sum ')'
//! ```

use super::DiceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Expr {
    Number(i32),
    Dice { count: u32, sides: u32 },
    Var(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Number(u64),
    Die,
    Var(String),
    Plus,
    Minus,
    Star,
    LParen,
    RParen,
}

fn tokenize(formula: &str) -> Result<Vec<(Token, usize)>, DiceError> {
    let mut tokens = Vec::new();
    let mut chars = formula.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '(' => Token::LParen,
            ')' => Token::RParen,
            'd' | 'D' => Token::Die,
            '0'..='9' => {
                let mut value = u64::from(ch as u8 - b'0');
                while let Some(&(_, next)) = chars.peek() {
                    let Some(digit) = next.to_digit(10) else {
                        break;
                    };
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u64::from(digit)))
                        .ok_or(DiceError::Overflow)?;
                    chars.next();
                }
                Token::Number(value)
            }
            '@' => {
                let mut path = String::new();
                while let Some(&(_, next)) = chars.peek() {
                    if !(next.is_ascii_alphanumeric() || next == '_' || next == '.') {
                        break;
                    }
                    path.push(next);
                    chars.next();
                }
                if path.is_empty() {
                    return Err(match chars.peek() {
                        Some(&(position, found)) => DiceError::UnexpectedChar {
                            formula: formula.to_string(),
                            position,
                            found,
                        },
                        None => DiceError::UnexpectedEnd {
                            formula: formula.to_string(),
                        },
                    });
                }
                Token::Var(path)
            }
            found => {
                return Err(DiceError::UnexpectedChar {
                    formula: formula.to_string(),
                    position,
                    found,
                });
            }
        };
        tokens.push((token, position));
    }

    Ok(tokens)
}

/// Parses a formula into an expression tree.
pub(crate) fn parse(formula: &str) -> Result<Expr, DiceError> {
    let tokens = tokenize(formula)?;
    if tokens.is_empty() {
        return Err(DiceError::EmptyFormula);
    }

    let mut parser = Parser {
        formula,
        tokens,
        cursor: 0,
    };
    let expr = parser.sum()?;
    match parser.tokens.get(parser.cursor) {
        Some(&(_, position)) => Err(parser.unexpected(position)),
        None => Ok(expr),
    }
}

struct Parser<'a> {
    formula: &'a str,
    tokens: Vec<(Token, usize)>,
    cursor: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(token, _)| token)
    }

    fn next(&mut self) -> Result<(Token, usize), DiceError> {
        let item = self
            .tokens
            .get(self.cursor)
            .cloned()
            .ok_or_else(|| DiceError::UnexpectedEnd {
                formula: self.formula.to_string(),
            })?;
        self.cursor += 1;
        Ok(item)
    }

    fn unexpected(&self, position: usize) -> DiceError {
        DiceError::UnexpectedToken {
            formula: self.formula.to_string(),
            position,
        }
    }

    fn sum(&mut self) -> Result<Expr, DiceError> {
        let mut lhs = self.product()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.product()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn product(&mut self) -> Result<Expr, DiceError> {
        let mut lhs = self.unary()?;
        while self.peek() == Some(&Token::Star) {
            self.cursor += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op: BinaryOp::Mul,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, DiceError> {
        if self.peek() == Some(&Token::Minus) {
            self.cursor += 1;
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, DiceError> {
        let (token, position) = self.next()?;
        match token {
            Token::Number(count) => {
                if self.peek() == Some(&Token::Die) {
                    self.cursor += 1;
                    let sides = self.sides()?;
                    return dice(count, sides);
                }
                let value = i32::try_from(count).map_err(|_| DiceError::Overflow)?;
                Ok(Expr::Number(value))
            }
            Token::Die => {
                let sides = self.sides()?;
                dice(1, sides)
            }
            Token::Var(path) => Ok(Expr::Var(path)),
            Token::LParen => {
                let inner = self.sum()?;
                match self.next()? {
                    (Token::RParen, _) => Ok(inner),
                    (_, position) => Err(self.unexpected(position)),
                }
            }
            _ => Err(self.unexpected(position)),
        }
    }

    fn sides(&mut self) -> Result<u64, DiceError> {
        match self.next()? {
            (Token::Number(sides), _) => Ok(sides),
            (_, position) => Err(self.unexpected(position)),
        }
    }
}

fn dice(count: u64, sides: u64) -> Result<Expr, DiceError> {
    let in_range = (1..=u64::from(super::MAX_DICE)).contains(&count)
        && (1..=u64::from(super::MAX_SIDES)).contains(&sides);
    if !in_range {
        return Err(DiceError::InvalidDice { count, sides });
    }
    // Both bounds are checked above.
    Ok(Expr::Dice {
        count: count as u32,
        sides: sides as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(path: &str) -> Box<Expr> {
        Box::new(Expr::Var(path.into()))
    }

    #[test]
    fn parses_ability_test_formula() {
        let expr = parse("d20+@abilities.strength.value").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(Expr::Dice {
                    count: 1,
                    sides: 20
                }),
                rhs: var("abilities.strength.value"),
            }
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse("1 + @die * 2").unwrap();
        let Expr::Binary { op, rhs, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(
            *rhs,
            Expr::Binary {
                op: BinaryOp::Mul,
                lhs: var("die"),
                rhs: Box::new(Expr::Number(2)),
            }
        );
    }

    #[test]
    fn parentheses_and_unary_minus() {
        let expr = parse("-(2d6 - 1)").unwrap();
        assert!(matches!(expr, Expr::Neg(_)));
    }

    #[test]
    fn reports_position_of_bad_input() {
        assert_eq!(
            parse("1d6 + #"),
            Err(DiceError::UnexpectedChar {
                formula: "1d6 + #".into(),
                position: 6,
                found: '#',
            })
        );
        assert_eq!(
            parse("1d6 2"),
            Err(DiceError::UnexpectedToken {
                formula: "1d6 2".into(),
                position: 4,
            })
        );
        assert_eq!(
            parse("(1d6"),
            Err(DiceError::UnexpectedEnd {
                formula: "(1d6".into()
            })
        );
        assert_eq!(parse("   "), Err(DiceError::EmptyFormula));
    }

    #[test]
    fn rejects_dice_outside_limits() {
        assert_eq!(
            parse("0d6"),
            Err(DiceError::InvalidDice { count: 0, sides: 6 })
        );
        assert_eq!(
            parse("101d6"),
            Err(DiceError::InvalidDice {
                count: 101,
                sides: 6
            })
        );
        assert_eq!(
            parse("d1001"),
            Err(DiceError::InvalidDice {
                count: 1,
                sides: 1001
            })
        );
    }
}
