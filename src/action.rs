use crate::token::Op;
use crate::Error;
use std::str::FromStr;

/// One user action, as sent by a keypad button
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A digit, decimal point, constant, parenthesis or percent sign
    Append(String),
    /// A function opening token, such as `sqrt(`
    AppendFunction(String),
    /// A binary operator
    Operator(Op),
    Clear,
    Backspace,
    ToggleSign,
    Square,
    /// The smart `()` button
    Paren,
    Evaluate,
}

impl FromStr for Action {
    type Err = Error;

    /// Map a button label to its action.
    ///
    /// ```
    /// # use calci::{Action, Op};
    /// assert_eq!("√".parse::<Action>(), Ok(Action::AppendFunction("sqrt(".into())));
    /// assert_eq!("x²".parse::<Action>(), Ok(Action::Square));
    /// assert_eq!("*".parse::<Action>(), Ok(Action::Operator(Op::Mul)));
    /// assert!("xyz".parse::<Action>().is_err());
    /// ```
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let action = match label {
            "=" => Self::Evaluate,
            "C" | "c" => Self::Clear,
            "⌫" | "back" => Self::Backspace,
            "()" => Self::Paren,
            "+/-" => Self::ToggleSign,
            "x²" | "sq" => Self::Square,
            "√" | "sqrt" => Self::AppendFunction("sqrt(".into()),
            "sin" | "cos" | "tan" => Self::AppendFunction(format!("{}(", label)),
            "log" => Self::AppendFunction("log10(".into()),
            "π" | "pi" => Self::Append("π".into()),
            "e" | "." | "(" | ")" | "%" => Self::Append(label.into()),
            digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                Self::Append(digits.into())
            }
            other => match other.parse() {
                Ok(op) => Self::Operator(op),
                Err(_) => return Err(Error::UnknownAction(other.into())),
            },
        };
        Ok(action)
    }
}
