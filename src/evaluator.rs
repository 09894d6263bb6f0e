use crate::buffer::{ExpressionBuffer, ERROR_MARKER};
use crate::canon::{balance, canonicalize};
use crate::config::Settings;
use crate::expr::eval;
use crate::format::format_value;
use crate::Error;
use tracing::debug;

/// Outcome of evaluating the content of an [`ExpressionBuffer`]
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    /// A finite result, and its display text
    Value {
        /// The numeric value
        value: f64,
        /// `value` formatted with the evaluator settings
        display: String,
    },
    /// Any failure, displayed as the error marker
    Failed(Error),
}

impl EvaluationResult {
    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Value { .. })
    }

    /// Get the display string (result or error marker).
    pub fn display(&self) -> &str {
        match self {
            Self::Value { display, .. } => display,
            Self::Failed(_) => ERROR_MARKER,
        }
    }
}

/// Turns the text of a buffer into a result, under a closed symbol table.
///
/// ```
/// # use calci::{Evaluator, ExpressionBuffer, Op};
/// let mut buffer = ExpressionBuffer::new();
/// buffer.append("7");
/// buffer.add_operator(Op::Plus);
/// buffer.append("3");
///
/// let evaluator = Evaluator::default();
/// evaluator.evaluate(&mut buffer);
/// assert_eq!(buffer.display(), ("7+3 = ", "10"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    settings: Settings,
}

impl Evaluator {
    /// An evaluator using `settings`
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// The settings used for canonicalization and display
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Close missing parenthesis, rewrite display symbols and evaluate.
    pub fn compute(&self, expression: &str) -> Result<f64, Error> {
        let balanced = balance(expression);
        let canonical = canonicalize(&balanced, &self.settings);
        eval(&canonical)
    }

    /// Evaluate `expression` and format the result
    pub fn evaluate_str(&self, expression: &str) -> EvaluationResult {
        match self.compute(expression) {
            Ok(value) => EvaluationResult::Value {
                value,
                display: format_value(value, &self.settings),
            },
            Err(err) => EvaluationResult::Failed(err),
        }
    }

    /// Evaluate the expression held by `buffer` and write the outcome back:
    /// the result goes to `current` and the evaluated expression becomes the
    /// history record in `pending`. On failure `current` shows the error
    /// marker and `pending` is cleared.
    ///
    /// Returns `None` without touching the buffer when there is nothing to
    /// evaluate.
    pub fn evaluate(&self, buffer: &mut ExpressionBuffer) -> Option<EvaluationResult> {
        if buffer.is_error() {
            return None;
        }
        let expression = buffer.expression();
        if expression.is_empty() {
            return None;
        }
        let balanced = balance(&expression);
        let result = self.evaluate_str(&balanced);
        match result {
            EvaluationResult::Value {
                display: ref shown, ..
            } => {
                debug!(expression = %balanced, result = %shown, "evaluated");
                buffer.commit(&balanced, shown.clone());
            }
            EvaluationResult::Failed(ref err) => {
                debug!(expression = %balanced, error = %err, "evaluation failed");
                buffer.fail();
            }
        }
        Some(result)
    }
}
