#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::must_use_candidate
)]

//! Calci, the engine of a button driven scientific calculator.
//!
//! The calculator keeps two lines of text: `pending`, the committed part of
//! the expression, and `current`, the operand being typed. Button presses
//! edit them through an [`ExpressionBuffer`](struct.ExpressionBuffer.html),
//! and the `=` button hands them to an [`Evaluator`](struct.Evaluator.html):
//!
//! ```
//! use calci::{Evaluator, ExpressionBuffer, Op};
//!
//! let mut buffer = ExpressionBuffer::new();
//! buffer.append("5");
//! buffer.append("(");
//! assert_eq!(buffer.current(), "5*(");
//! buffer.append("2");
//! buffer.add_operator(Op::Plus);
//! buffer.append("1");
//!
//! Evaluator::default().evaluate(&mut buffer);
//! assert_eq!(buffer.display(), ("5*(2+1) = ", "15"));
//! ```
//!
//! A [`Calculator`](struct.Calculator.html) wraps both, takes button labels
//! and notifies subscribers when the display changes:
//!
//! ```
//! let mut calculator = calci::Calculator::default();
//! for label in ["√", "9", "="] {
//!     calculator.press(label).unwrap();
//! }
//! assert_eq!(calculator.buffer().current(), "3");
//! ```
//!
//! # Language definition
//!
//! The evaluator understands the following elements, and nothing else:
//!
//! - number literals made of digits and a decimal point: `12`, `0.5`, `.5`,
//!   with an optional exponent as in displayed results: `1e20`, `2.5e-3`;
//! - left and right parenthesis;
//! - binary operators: `+`, `-`, `*`, `/` and `**` for exponentiation, with
//!   the usual precedence, `**` being right associative;
//! - prefix `-` and `+`, binding looser than `**`: `-2**2` is `-4`;
//! - the functions `sqrt`, `sin`, `cos`, `tan` and `log10`;
//! - the constants `pi` (also written `π`) and `e`.
//!
//! Before evaluation, unclosed parenthesis are closed, and depending on the
//! [`Settings`](struct.Settings.html) a bare `log` is read as `log10` and `%`
//! as `/100`. Any other name or symbol is an error, as is any step that does
//! not produce a finite number.
//!
//! # Technical details
//!
//! Expressions are parsed with a Shunting-Yard algorithm into an AST, which
//! is then interpreted on `f64` values.

#[macro_use]
extern crate lazy_static;

mod action;
mod ast;
mod buffer;
mod canon;
pub mod config;
mod error;
mod evaluator;
mod expr;
mod format;
mod lexer;
mod session;
mod token;
mod util;

pub use action::Action;
pub use ast::Ast;
pub use buffer::{ExpressionBuffer, ERROR_MARKER, HISTORY_SEPARATOR};
pub use canon::{balance, canonicalize};
pub use config::{ConfigError, Settings};
pub use error::Error;
pub use evaluator::{EvaluationResult, Evaluator};
pub use expr::{eval, Expr};
pub use format::format_value;
pub use session::Calculator;
pub use token::Op;
pub use util::{CONSTANTS, FUNCTIONS};
