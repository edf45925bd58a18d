//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured delimiter is unusable: nothing is left once trimmed.
    #[error("invalid delimiter {0:?}: empty after trimming")]
    InvalidDelimiter(String),
    /// A command identifier that is not part of the registry. Reaching this
    /// from the menu or CLI surface is a programming error.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}
