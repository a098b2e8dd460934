//! Arithmetic expression evaluation
//!
//! A tokenizer plus a precedence-climbing parser that evaluates one side of an
//! equation to an `f64`.
//!
//! Precedence, from loosest to tightest:
//! - `+` `-` (left associative)
//! - `*` `/` (left associative)
//! - unary `+` `-`
//! - `^` (right associative, `-2^2` is `-4`)

use thiserror::Error;

/// Reasons an expression fails to evaluate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("number '{0}' is out of range")]
    NumberOutOfRange(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(char),
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NotFinite,
    #[error("expression nests deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

/// Nesting limit for signs, parentheses and exponents
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Op(char),
    Open,
    Close,
}

impl Token {
    const fn symbol(self) -> char {
        match self {
            Self::Num(_) => '#',
            Self::Op(op) => op,
            Self::Open => '(',
            Self::Close => ')',
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_ascii_whitespace() => {
                chars.next();
            }
            '0'..='9' => {
                let mut end = start;
                while let Some(&(idx, c)) = chars.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    end = idx + c.len_utf8();
                    chars.next();
                }
                let literal = &input[start..end];
                let value: f64 = literal
                    .parse()
                    .map_err(|_| EvalError::NumberOutOfRange(literal.to_string()))?;
                if !value.is_finite() {
                    return Err(EvalError::NumberOutOfRange(literal.to_string()));
                }
                tokens.push(Token::Num(value));
            }
            '+' | '-' | '*' | '/' | '^' => {
                tokens.push(Token::Op(ch));
                chars.next();
            }
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            self.bump();
            let rhs = self.term()?;
            value = finite(if op == '+' { value + rhs } else { value - rhs })?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek() {
            self.bump();
            let rhs = self.unary()?;
            value = if op == '*' {
                finite(value * rhs)?
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                finite(value / rhs)?
            };
        }
        Ok(value)
    }

    // Every recursive path (signs, `(`, `^`) passes through here
    fn unary(&mut self) -> Result<f64, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(Token::Op('-')) => {
                self.bump();
                Ok(-self.unary()?)
            }
            Some(Token::Op('+')) => {
                self.bump();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.atom()?;
        if let Some(Token::Op('^')) = self.peek() {
            self.bump();
            // Right side goes back through unary so `2^-1` and `2^3^2` parse
            let exponent = self.unary()?;
            return finite(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, EvalError> {
        match self.bump() {
            Some(Token::Num(value)) => Ok(value),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.bump() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(EvalError::UnbalancedParens),
                }
            }
            Some(Token::Close) => Err(EvalError::UnbalancedParens),
            Some(token) => Err(EvalError::UnexpectedToken(token.symbol())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NotFinite)
    }
}

/// Evaluate an arithmetic expression
///
/// # Errors
/// Returns `EvalError` for empty input, characters outside the arithmetic
/// alphabet, malformed token sequences, division by zero, and non-finite
/// results.
///
/// # Examples
/// ```
/// use nerdle::core::evaluate;
///
/// assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
/// assert!(evaluate("1/0").is_err());
/// ```
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;

    match parser.peek() {
        None => Ok(value),
        Some(Token::Close) => Err(EvalError::UnbalancedParens),
        Some(token) => Err(EvalError::UnexpectedToken(token.symbol())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_single_number() {
        assert_eq!(evaluate("42").unwrap(), 42.0);
        assert_eq!(evaluate("007").unwrap(), 7.0);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("10-6/2").unwrap(), 7.0);
    }

    #[test]
    fn equal_precedence_is_left_to_right() {
        assert_eq!(evaluate("10-3-2").unwrap(), 5.0);
        assert_eq!(evaluate("24/4/2").unwrap(), 3.0);
        assert_eq!(evaluate("9/3*3").unwrap(), 9.0);
    }

    #[test]
    fn power_is_right_associative_and_tightest() {
        assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
        assert_eq!(evaluate("2*3^2").unwrap(), 18.0);
        assert_eq!(evaluate("-2^2").unwrap(), -4.0);
        assert_eq!(evaluate("2^-1").unwrap(), 0.5);
    }

    #[test]
    fn unary_signs() {
        assert_eq!(evaluate("-5+8").unwrap(), 3.0);
        assert_eq!(evaluate("+5").unwrap(), 5.0);
        assert_eq!(evaluate("3--2").unwrap(), 5.0);
    }

    #[test]
    fn parentheses_and_whitespace() {
        assert_eq!(evaluate("(1+2)*3").unwrap(), 9.0);
        assert_eq!(evaluate(" 1 + 2 ").unwrap(), 3.0);
        assert_eq!(evaluate("(1+2").unwrap_err(), EvalError::UnbalancedParens);
        assert_eq!(evaluate("1+2)").unwrap_err(), EvalError::UnbalancedParens);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert_eq!(evaluate("").unwrap_err(), EvalError::Empty);
        assert_eq!(evaluate("   ").unwrap_err(), EvalError::Empty);
        assert_eq!(evaluate("1+").unwrap_err(), EvalError::UnexpectedEnd);
        assert_eq!(evaluate("*3").unwrap_err(), EvalError::UnexpectedToken('*'));
        assert_eq!(evaluate("1=1").unwrap_err(), EvalError::UnexpectedChar('='));
        assert_eq!(evaluate("2x").unwrap_err(), EvalError::UnexpectedChar('x'));
        assert!(evaluate("1 2").is_err());
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(evaluate("1/0").unwrap_err(), EvalError::DivisionByZero);
        assert_eq!(evaluate("5/(3-3)").unwrap_err(), EvalError::DivisionByZero);
    }

    #[test]
    fn long_sign_runs_are_an_error() {
        let signs = format!("{}1", "-".repeat(200_000));
        assert_eq!(evaluate(&signs).unwrap_err(), EvalError::TooDeep);
        assert_eq!(evaluate("--1").unwrap(), 1.0);
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let nested = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(evaluate(&nested).unwrap_err(), EvalError::TooDeep);

        let unclosed = format!("{}1", "(".repeat(100_000));
        assert_eq!(evaluate(&unclosed).unwrap_err(), EvalError::TooDeep);

        let powers = format!("2{}", "^1".repeat(100_000));
        assert_eq!(evaluate(&powers).unwrap_err(), EvalError::TooDeep);

        let shallow = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(evaluate(&shallow).unwrap(), 1.0);
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(evaluate("9^9^9").unwrap_err(), EvalError::NotFinite);
    }
}
