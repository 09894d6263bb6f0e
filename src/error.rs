/// Error type for the calci crate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Error while parsing an expression
    #[error("ParseError: {0}")]
    ParseError(String),
    /// A name outside of the symbol table
    #[error("NameError: {0}")]
    NameError(String),
    /// A well formed expression without a finite value, like `sqrt(-1)`
    #[error("DomainError: {0}")]
    DomainError(String),
    /// A button label that does not map to any action
    #[error("UnknownAction: {0}")]
    UnknownAction(String),
}
