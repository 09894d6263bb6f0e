use crate::error::Error;
use crate::token::{Op, Token};
use crate::util::{is_function, CONSTANTS, FUNCTIONS};

/// Deepest tree accepted by [`Ast::from_tokens`]. Building and evaluating
/// recurse once per level.
pub const MAX_DEPTH: usize = 1000;

/// Height of the tree described by `tokens` in reverse polish notation,
/// without building it. Malformed sequences are left to the builder.
fn depth(tokens: &[Token]) -> usize {
    let mut stack: Vec<usize> = Vec::new();
    let mut deepest = 0;
    for token in tokens {
        let height = match token {
            Token::Name(name) if is_function(name) => stack.pop().unwrap_or(0) + 1,
            Token::Number(_) | Token::Name(_) => 1,
            Token::Negate => stack.pop().unwrap_or(0) + 1,
            Token::Op(_) => {
                let right = stack.pop().unwrap_or(0);
                let left = stack.pop().unwrap_or(0);
                right.max(left) + 1
            }
            Token::LParen | Token::RParen => continue,
        };
        deepest = deepest.max(height);
        stack.push(height);
    }
    deepest
}

/// Ast nodes for the expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// A constant value, either a literal or a named constant
    Value(f64),
    /// -<arg>
    Neg(Box<Ast>),
    /// <left> + <right>
    Add(Box<Ast>, Box<Ast>),
    /// <left> - <right>
    Sub(Box<Ast>, Box<Ast>),
    /// <left> * <right>
    Mul(Box<Ast>, Box<Ast>),
    /// <left> / <right>
    Div(Box<Ast>, Box<Ast>),
    /// <left> ** <right>
    Exp(Box<Ast>, Box<Ast>),
    /// fn(<arg>)
    Function(&'static str, fn(f64) -> f64, Box<Ast>),
}

impl Ast {
    /// Construct the AST for a vector of tokens in reverse polish notation.
    /// This function eats the tokens as it uses them, and fails if some are
    /// left over.
    pub fn from_tokens(tokens: &mut Vec<Token>) -> Result<Self, Error> {
        if depth(tokens) > MAX_DEPTH {
            return Err(Error::ParseError(format!(
                "expression nested deeper than {} levels",
                MAX_DEPTH
            )));
        }
        let ast = Self::from_tokens_internal(tokens, "")?;
        if tokens.is_empty() {
            Ok(ast)
        } else {
            Err(Error::ParseError("missing operator between values".into()))
        }
    }

    fn from_tokens_internal(tokens: &mut Vec<Token>, context: &str) -> Result<Self, Error> {
        match tokens.pop() {
            Some(Token::Number(number)) => Ok(Self::Value(number)),
            Some(Token::Name(name)) => {
                if let Some((&name, &func)) = FUNCTIONS.get_key_value(name.as_str()) {
                    let arg = Box::new(Self::from_tokens_internal(tokens, " in function call")?);
                    Ok(Self::Function(name, func, arg))
                } else if let Some(&value) = CONSTANTS.get(name.as_str()) {
                    Ok(Self::Value(value))
                } else {
                    Err(Error::NameError(format!("name '{}' is not defined", name)))
                }
            }
            Some(Token::Negate) => {
                let arg = Box::new(Self::from_tokens_internal(tokens, " after unary minus")?);
                Ok(Self::Neg(arg))
            }
            Some(Token::Op(op)) => {
                let right = Box::new(Self::from_tokens_internal(tokens, " after operator")?);
                let left = Box::new(Self::from_tokens_internal(tokens, " before operator")?);
                match op {
                    Op::Plus => Ok(Self::Add(left, right)),
                    Op::Minus => Ok(Self::Sub(left, right)),
                    Op::Mul => Ok(Self::Mul(left, right)),
                    Op::Div => Ok(Self::Div(left, right)),
                    Op::Exp => Ok(Self::Exp(left, right)),
                }
            }
            Some(other) => Err(Error::ParseError(format!(
                "unexpected {:?} after shunting yard",
                other
            ))),
            None => Err(Error::ParseError(format!("empty expression{}", context))),
        }
    }

    /// If the AST node correspond to a constant, get `Some(constant)`. Else,
    /// get `None`
    pub fn value(&self) -> Option<f64> {
        if let Self::Value(value) = *self {
            Some(value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Ast, MAX_DEPTH};
    use crate::lexer::Lexer;
    use crate::Error;

    fn build(input: &str) -> Result<Ast, Error> {
        Ast::from_tokens(&mut Lexer::new(input).parse()?)
    }

    #[test]
    fn constants_are_resolved() {
        assert_eq!(build("pi").unwrap().value(), Some(std::f64::consts::PI));
        assert_eq!(build("e").unwrap().value(), Some(std::f64::consts::E));
    }

    #[test]
    fn structure() {
        let ast = build("sqrt(9)+1").unwrap();
        match ast {
            Ast::Add(left, right) => {
                assert!(matches!(*left, Ast::Function("sqrt", _, _)));
                assert_eq!(right.value(), Some(1.0));
            }
            other => panic!("unexpected tree {:?}", other),
        }
    }

    #[test]
    fn errors() {
        assert_eq!(
            build("x+1"),
            Err(Error::NameError("name 'x' is not defined".into()))
        );
        assert_eq!(
            build("1+"),
            Err(Error::ParseError("empty expression before operator".into()))
        );
        assert!(matches!(build("(1)(2)"), Err(Error::ParseError(_))));
        assert!(matches!(build(""), Err(Error::ParseError(_))));
        assert!(matches!(build("sqrt()"), Err(Error::ParseError(_))));
    }

    #[test]
    fn depth_limit() {
        let deep = format!("1{}", "+1".repeat(MAX_DEPTH - 1));
        assert!(build(&deep).is_ok());

        let too_deep = format!("1{}", "+1".repeat(50_000));
        assert!(matches!(build(&too_deep), Err(Error::ParseError(_))));
        let nested = format!("{}1{}", "-(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(matches!(build(&nested), Err(Error::ParseError(_))));
    }
}
