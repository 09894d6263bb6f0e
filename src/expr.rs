use crate::ast::Ast;
use crate::lexer::Lexer;
use crate::Error;

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed. Only the functions and
/// constants of the built-in symbol table are reachable.
///
/// # Example
///
/// ```
/// # use calci::eval;
/// assert_eq!(eval("45 - 2**3"), Ok(37.0));
/// assert!(eval("sqrt(-1)").is_err());
/// ```
pub fn eval(input: &str) -> Result<f64, Error> {
    Expr::parse(input).and_then(|expr| expr.eval())
}

/// A parsed mathematical expression.
///
/// # Examples
/// ```
/// # use calci::Expr;
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(), Ok(13.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use calci::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff + 5 * 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(expression);
        let ast = Ast::from_tokens(&mut lexer.parse()?)?;
        Ok(Self { ast })
    }

    /// Evaluate the expression. Any step producing a value that is not a
    /// finite number is reported as a `DomainError`.
    pub fn eval(&self) -> Result<f64, Error> {
        Self::inner_eval(&self.ast)
    }

    /// The parsed tree
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    fn inner_eval(ast: &Ast) -> Result<f64, Error> {
        let value = match *ast {
            Ast::Value(number) => number,
            Ast::Neg(ref arg) => -Self::inner_eval(arg)?,
            Ast::Add(ref left, ref right) => Self::inner_eval(left)? + Self::inner_eval(right)?,
            Ast::Sub(ref left, ref right) => Self::inner_eval(left)? - Self::inner_eval(right)?,
            Ast::Mul(ref left, ref right) => Self::inner_eval(left)? * Self::inner_eval(right)?,
            Ast::Div(ref left, ref right) => {
                let left = Self::inner_eval(left)?;
                let right = Self::inner_eval(right)?;
                if right == 0.0 {
                    return Err(Error::DomainError("division by zero".into()));
                }
                left / right
            }
            Ast::Exp(ref left, ref right) => {
                libm::pow(Self::inner_eval(left)?, Self::inner_eval(right)?)
            }
            Ast::Function(name, func, ref arg) => {
                let arg = Self::inner_eval(arg)?;
                let value = func(arg);
                if !value.is_finite() {
                    return Err(Error::DomainError(format!(
                        "{}({}) is not defined",
                        name, arg
                    )));
                }
                value
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::DomainError("result is not a finite number".into()))
        }
    }
}
