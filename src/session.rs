use crate::action::Action;
use crate::buffer::ExpressionBuffer;
use crate::config::Settings;
use crate::evaluator::Evaluator;
use crate::Error;
use tracing::trace;

type Listener = Box<dyn FnMut(&ExpressionBuffer)>;

/// An interactive calculator session.
///
/// Owns the expression state, applies one action at a time and notifies its
/// subscribers whenever the displayed text changes.
///
/// ```
/// # use calci::Calculator;
/// let mut calculator = Calculator::default();
/// for label in ["7", "+", "3", "*", "2", "="] {
///     calculator.press(label).unwrap();
/// }
/// assert_eq!(calculator.buffer().current(), "13");
/// ```
#[derive(Default)]
pub struct Calculator {
    buffer: ExpressionBuffer,
    evaluator: Evaluator,
    listeners: Vec<Listener>,
}

impl Calculator {
    /// An empty session evaluating with `settings`
    pub fn new(settings: Settings) -> Self {
        Self {
            evaluator: Evaluator::new(settings),
            ..Self::default()
        }
    }

    /// The current expression state
    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Register `listener`, called with the buffer after every action that
    /// changed it.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ExpressionBuffer) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Apply `action` and return the `(pending, current)` display pair
    pub fn dispatch(&mut self, action: &Action) -> (&str, &str) {
        trace!(?action, "dispatch");
        let before = self.buffer.clone();
        match action {
            Action::Append(token) => {
                self.buffer.append(token);
            }
            Action::AppendFunction(name) => {
                self.buffer.append_function(name);
            }
            Action::Operator(op) => {
                self.buffer.add_operator(*op);
            }
            Action::Clear => {
                self.buffer.clear();
            }
            Action::Backspace => {
                self.buffer.backspace();
            }
            Action::ToggleSign => {
                self.buffer.toggle_sign();
            }
            Action::Square => {
                self.buffer.square();
            }
            Action::Paren => {
                self.buffer.handle_paren();
            }
            Action::Evaluate => {
                self.evaluator.evaluate(&mut self.buffer);
            }
        }
        if self.buffer != before {
            for listener in &mut self.listeners {
                listener(&self.buffer);
            }
        }
        self.buffer.display()
    }

    /// Parse a button label and dispatch it
    pub fn press(&mut self, label: &str) -> Result<(&str, &str), Error> {
        let action: Action = label.parse()?;
        Ok(self.dispatch(&action))
    }
}
