use crate::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal
    Number(f64),
    /// A function or constant name, resolved against the symbol table later
    Name(String),
    /// A binary operator
    Op(Op),
    /// Prefix minus
    Negate,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

/// Binary operators, both in the grammar and on the calculator keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**`
    Exp,
}

/// Precedence of the prefix minus: above `*` and `/`, below `**`
pub const NEGATE_PRECEDENCE: u8 = 3;

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
            Self::Exp => 4,
        }
    }

    /// Check if the operator is left associative
    pub fn is_left_associative(self) -> bool {
        match self {
            Self::Plus | Self::Minus | Self::Mul | Self::Div => true,
            Self::Exp => false,
        }
    }

    /// Check if the operator is right associative
    pub fn is_right_associative(self) -> bool {
        !self.is_left_associative()
    }

    /// The text this operator is written as in an expression
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Exp => "**",
        }
    }
}

impl Display for Op {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.symbol())
    }
}

impl FromStr for Op {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Plus),
            "-" => Ok(Self::Minus),
            "*" => Ok(Self::Mul),
            "/" => Ok(Self::Div),
            // the keypad binds `^` to power
            "**" | "^" => Ok(Self::Exp),
            other => Err(Error::ParseError(format!("unknown operator {}", other))),
        }
    }
}
