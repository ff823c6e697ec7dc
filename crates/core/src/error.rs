//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a caller-recoverable validation outcome. The `Display`
/// output is the human-readable detail handed to whoever renders feedback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Empty item name or non-positive quantity.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The named item is not held in the ledger.
    #[error("item not found: {0}")]
    NotFound(String),

    /// A removal asked for more units than are on hand.
    #[error("insufficient stock for {name}: requested {requested}, on hand {on_hand}")]
    InsufficientStock {
        name: String,
        requested: u64,
        on_hand: u64,
    },
}

/// Fieldless classification of a [`DomainError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    InsufficientStock,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InsufficientStock => "insufficient_stock",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn insufficient_stock(name: impl Into<String>, requested: u64, on_hand: u64) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            requested,
            on_hand,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidInput(_) => ErrorKind::InvalidInput,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
        }
    }
}
