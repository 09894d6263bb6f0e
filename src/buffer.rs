//! The two line text state of the calculator.
//!
//! `pending` holds the committed part of the expression, ending either in a
//! binary operator or in a `"<expression> = "` history record. `current`
//! holds the operand being typed. Every mutation returns both lines for
//! display; nothing here evaluates or validates the expression.

use crate::token::Op;
use tracing::trace;

/// Shown in place of a result when evaluation fails
pub const ERROR_MARKER: &str = "Error";

/// Ends `pending` after a successful evaluation
pub const HISTORY_SEPARATOR: &str = " = ";

const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/'];

fn is_constant(c: char) -> bool {
    c == 'π' || c == 'e'
}

/// Whether a `*` has to go between `last` and `token`, like in `5(`, `5π` or
/// `)3`.
fn implicit_multiplication(last: Option<char>, token: &str) -> bool {
    let last = match last {
        Some(last) => last,
        None => return false,
    };
    match token {
        "(" => last.is_ascii_digit() || last == ')' || is_constant(last),
        "π" | "e" => last.is_ascii_digit(),
        _ => token.starts_with(|c: char| c.is_ascii_digit()) && (last == ')' || is_constant(last)),
    }
}

/// `expression` without its trailing binary operator, if it has one
fn strip_operator(expression: &str) -> Option<&str> {
    expression
        .strip_suffix(Op::Exp.symbol())
        .or_else(|| expression.strip_suffix(OPERATOR_CHARS))
}

/// The inside of `-(inner)`, when the parenthesis after the sign is the one
/// closed at the very end
fn unwrap_negation(expression: &str) -> Option<&str> {
    let inner = expression.strip_prefix("-(")?.strip_suffix(')')?;
    let mut depth = 0_i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return None;
        }
    }
    (depth == 0).then_some(inner)
}

/// Pending and current text of an expression being typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    pending: String,
    current: String,
}

impl ExpressionBuffer {
    /// An empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer starting from the given lines
    pub fn with_state(pending: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            pending: pending.into(),
            current: current.into(),
        }
    }

    /// The committed part of the expression, or the history record
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// The operand being typed, a result or the error marker
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Both display lines, `(pending, current)`
    pub fn display(&self) -> (&str, &str) {
        (&self.pending, &self.current)
    }

    /// The whole text shown to the user, `pending + current`
    pub fn full_expression(&self) -> String {
        format!("{}{}", self.pending, self.current)
    }

    /// The text to evaluate. A history record in `pending` is not part of it.
    pub fn expression(&self) -> String {
        if self.has_history() {
            self.current.clone()
        } else {
            self.full_expression()
        }
    }

    /// Whether the last evaluation failed and nothing was typed since
    pub fn is_error(&self) -> bool {
        self.current == ERROR_MARKER
    }

    /// Whether `pending` holds the record of the last evaluation
    pub fn has_history(&self) -> bool {
        self.pending.ends_with(HISTORY_SEPARATOR)
    }

    /// Append a digit, decimal point, constant or parenthesis to `current`,
    /// inserting an implicit `*` where needed.
    pub fn append(&mut self, token: &str) -> (&str, &str) {
        self.recover();
        if implicit_multiplication(self.current.chars().last(), token) {
            self.current.push('*');
        }
        self.current.push_str(token);
        self.updated("append")
    }

    /// Append a function opening token such as `sqrt(`.
    pub fn append_function(&mut self, name: &str) -> (&str, &str) {
        self.recover();
        let after_digit = self.current.ends_with(|c: char| c.is_ascii_digit());
        if after_digit && !name.starts_with('(') {
            self.current.push('*');
        }
        self.current.push_str(name);
        self.updated("append_function")
    }

    /// Flush `current` into `pending` followed by `op`. With nothing typed,
    /// a trailing operator of `pending` is replaced instead.
    pub fn add_operator(&mut self, op: Op) -> (&str, &str) {
        if self.is_error() {
            return self.display();
        }
        if self.current.is_empty() {
            if let Some(stem) = strip_operator(&self.pending) {
                let len = stem.len();
                self.pending.truncate(len);
                self.pending.push_str(op.symbol());
            }
        } else {
            if self.has_history() {
                self.pending.clear();
            }
            self.pending.push_str(&self.current);
            self.pending.push_str(op.symbol());
            self.current.clear();
        }
        self.updated("add_operator")
    }

    /// Empty both lines
    pub fn clear(&mut self) -> (&str, &str) {
        self.pending.clear();
        self.current.clear();
        self.updated("clear")
    }

    /// Remove the last character of `current`. The error marker goes as a
    /// whole.
    pub fn backspace(&mut self) -> (&str, &str) {
        if self.is_error() {
            return self.clear();
        }
        self.current.pop();
        self.updated("backspace")
    }

    /// Negate `current`, or undo a previous negation.
    pub fn toggle_sign(&mut self) -> (&str, &str) {
        if self.current.is_empty() || self.is_error() {
            return self.display();
        }
        self.current = if self.current.ends_with(')') {
            match unwrap_negation(&self.current) {
                Some(inner) => inner.to_string(),
                None => format!("-({})", self.current),
            }
        } else if let Some(positive) = self.current.strip_prefix('-') {
            positive.to_string()
        } else {
            format!("-{}", self.current)
        };
        self.updated("toggle_sign")
    }

    /// Rewrite `current` as `(current)**2`.
    pub fn square(&mut self) -> (&str, &str) {
        if self.current.is_empty() || self.is_error() {
            return self.display();
        }
        self.current = format!("({})**2", self.current);
        self.updated("square")
    }

    /// Close the innermost open group when that makes sense, else open a new
    /// one.
    pub fn handle_paren(&mut self) -> (&str, &str) {
        self.recover();
        let opened = self.current.matches('(').count();
        let closed = self.current.matches(')').count();
        let closable = self
            .current
            .chars()
            .last()
            .map_or(false, |c| c != '(' && !OPERATOR_CHARS.contains(&c));
        if opened > closed && closable {
            self.append(")")
        } else {
            self.append("(")
        }
    }

    /// Store a successful evaluation of `expression`
    pub(crate) fn commit(&mut self, expression: &str, result: String) {
        self.pending = format!("{}{}", expression, HISTORY_SEPARATOR);
        self.current = result;
    }

    /// Store a failed evaluation
    pub(crate) fn fail(&mut self) {
        self.pending.clear();
        self.current = ERROR_MARKER.to_string();
    }

    /// Input after an error starts a new expression
    fn recover(&mut self) {
        if self.is_error() {
            self.pending.clear();
            self.current.clear();
        }
    }

    fn updated(&self, action: &str) -> (&str, &str) {
        trace!(action, pending = %self.pending, current = %self.current, "buffer updated");
        self.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn typed(tokens: &[&str]) -> ExpressionBuffer {
        let mut buffer = ExpressionBuffer::new();
        for token in tokens {
            buffer.append(token);
        }
        buffer
    }

    #[test_case(&["1", "2", "3"] => "123" ; "digits concatenate")]
    #[test_case(&["5", "("] => "5*(" ; "paren after digit")]
    #[test_case(&["(", "1", ")", "("] => "(1)*(" ; "paren after paren")]
    #[test_case(&["π", "("] => "π*(" ; "paren after constant")]
    #[test_case(&["π", "3"] => "π*3" ; "digit after pi")]
    #[test_case(&["e", "3"] => "e*3" ; "digit after e")]
    #[test_case(&["(", "2", ")", "3"] => "(2)*3" ; "digit after paren")]
    #[test_case(&["2", "π"] => "2*π" ; "pi after digit")]
    #[test_case(&["2", "e"] => "2*e" ; "e after digit")]
    #[test_case(&["π", "π"] => "ππ" ; "constant after constant is left alone")]
    #[test_case(&["3", ".", "1", ".", "4"] => "3.1.4" ; "decimal points are not guarded")]
    fn append(tokens: &[&str]) -> String {
        typed(tokens).current().to_string()
    }

    #[test_case("9", "sqrt(" => "9*sqrt(" ; "function after digit")]
    #[test_case("", "sin(" => "sin(" ; "function on empty")]
    #[test_case("π", "cos(" => "πcos(" ; "only digits trigger multiplication")]
    #[test_case("9", "(" => "9(" ; "token starting with a paren")]
    fn append_function(current: &str, name: &str) -> String {
        let mut buffer = ExpressionBuffer::with_state("", current);
        buffer.append_function(name);
        buffer.current().to_string()
    }

    #[test]
    fn operator_flushes_current() {
        let mut buffer = typed(&["7"]);
        assert_eq!(buffer.add_operator(Op::Plus), ("7+", ""));
        buffer.append("3");
        assert_eq!(buffer.add_operator(Op::Mul), ("7+3*", ""));
        assert_eq!(buffer.full_expression(), "7+3*");
    }

    #[test_case("5+", Op::Minus => "5-" ; "replaces trailing operator")]
    #[test_case("5**", Op::Div => "5/" ; "replaces trailing power")]
    #[test_case("5*", Op::Exp => "5**" ; "switch to power")]
    #[test_case("", Op::Div => "" ; "nothing to operate on")]
    #[test_case("1+1 = ", Op::Plus => "1+1 = " ; "history without a result")]
    fn operator_substitution(pending: &str, op: Op) -> String {
        let mut buffer = ExpressionBuffer::with_state(pending, "");
        buffer.add_operator(op);
        buffer.pending().to_string()
    }

    #[test]
    fn operator_after_result_chains() {
        let mut buffer = ExpressionBuffer::with_state("7+3*2 = ", "13");
        assert_eq!(buffer.add_operator(Op::Minus), ("13-", ""));
    }

    #[test]
    fn clear_and_backspace() {
        let mut buffer = ExpressionBuffer::with_state("1+", "2π");
        assert_eq!(buffer.backspace(), ("1+", "2"));
        assert_eq!(buffer.backspace(), ("1+", ""));
        assert_eq!(buffer.backspace(), ("1+", ""));
        assert_eq!(buffer.clear(), ("", ""));
    }

    #[test_case("5" => "-5")]
    #[test_case("-5" => "5")]
    #[test_case("(1+2)" => "-((1+2))" ; "wraps a group")]
    #[test_case("sqrt(9)" => "-(sqrt(9))" ; "wraps a call")]
    #[test_case("-(sqrt(9))" => "sqrt(9)" ; "unwraps a negation")]
    #[test_case("-(1)*(2)" => "-(-(1)*(2))" ; "sign not covering the whole operand")]
    #[test_case("(5)**2" => "-(5)**2" ; "square ends with a digit")]
    #[test_case("" => "" ; "empty")]
    fn toggle_sign(current: &str) -> String {
        let mut buffer = ExpressionBuffer::with_state("", current);
        buffer.toggle_sign();
        buffer.current().to_string()
    }

    #[test]
    fn square() {
        let mut buffer = typed(&["5"]);
        assert_eq!(buffer.square(), ("", "(5)**2"));
        buffer.toggle_sign();
        assert_eq!(buffer.square(), ("", "(-(5)**2)**2"));
        assert_eq!(ExpressionBuffer::new().square(), ("", ""));
    }

    #[test_case("" => "(" ; "opens on empty")]
    #[test_case("(1" => "(1)" ; "closes after digit")]
    #[test_case("(1+" => "(1+(" ; "opens after operator")]
    #[test_case("(" => "((" ; "opens after open")]
    #[test_case("5" => "5*(" ; "opens with implicit multiplication")]
    #[test_case("(2)" => "(2)*(" ; "balanced closes are reopened")]
    #[test_case("sqrt(π" => "sqrt(π)" ; "closes after constant")]
    fn handle_paren(current: &str) -> String {
        let mut buffer = ExpressionBuffer::with_state("", current);
        buffer.handle_paren();
        buffer.current().to_string()
    }

    #[test]
    fn input_after_error_starts_over() {
        let mut buffer = ExpressionBuffer::new();
        buffer.fail();
        assert!(buffer.is_error());
        assert_eq!(buffer.add_operator(Op::Plus), ("", ERROR_MARKER));
        assert_eq!(buffer.toggle_sign(), ("", ERROR_MARKER));
        assert_eq!(buffer.square(), ("", ERROR_MARKER));
        assert_eq!(buffer.append("4"), ("", "4"));

        buffer.fail();
        assert_eq!(buffer.append_function("sin("), ("", "sin("));
        buffer.fail();
        assert_eq!(buffer.handle_paren(), ("", "("));
        buffer.fail();
        assert_eq!(buffer.backspace(), ("", ""));
    }

    #[test]
    fn history_is_not_evaluated_again() {
        let mut buffer = ExpressionBuffer::new();
        buffer.commit("1+1", "2".to_string());
        assert_eq!(buffer.display(), ("1+1 = ", "2"));
        assert!(buffer.has_history());
        assert_eq!(buffer.full_expression(), "1+1 = 2");
        assert_eq!(buffer.expression(), "2");
    }
}
