use crate::config::Settings;
use std::borrow::Cow;

/// Close every unterminated group by appending the missing `)`. Opening
/// parenthesis are never inserted.
pub fn balance(expression: &str) -> Cow<'_, str> {
    let opened = expression.matches('(').count();
    let closed = expression.matches(')').count();
    if opened > closed {
        let mut balanced = String::with_capacity(expression.len() + opened - closed);
        balanced.push_str(expression);
        balanced.extend(std::iter::repeat(')').take(opened - closed));
        Cow::Owned(balanced)
    } else {
        Cow::Borrowed(expression)
    }
}

/// Rewrite display symbols into the names known by the evaluator: `π`
/// becomes `pi`, and depending on `settings` a bare `log` becomes `log10` and
/// `%` becomes `/100`.
pub fn canonicalize(expression: &str, settings: &Settings) -> String {
    let mut output = String::with_capacity(expression.len() + 8);
    let mut chars = expression.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'π' => output.push_str("pi"),
            '%' if settings.percent => output.push_str("/100"),
            c if c == '_' || c.is_ascii_alphabetic() => {
                let mut name = String::new();
                name.push(c);
                while let Some(&c) = chars.peek() {
                    if c != '_' && !c.is_ascii_alphanumeric() {
                        break;
                    }
                    chars.next();
                    name.push(c);
                }
                if settings.log_alias && name == "log" {
                    output.push_str("log10");
                } else {
                    output.push_str(&name);
                }
            }
            other => output.push(other),
        }
    }
    output
}
