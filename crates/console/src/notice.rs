//! User-facing feedback for ledger results.

use serde::Serialize;

use stockroom_core::{DomainError, ErrorKind};
use stockroom_inventory::{AddOutcome, RemoveOutcome};

use crate::action::ParseError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Success => "[ok]",
            Severity::Info => "[info]",
            Severity::Warning => "[warn]",
            Severity::Error => "[error]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn render(&self) -> String {
        format!("{} {}", self.severity.tag(), self.message)
    }
}

impl From<&AddOutcome> for Notice {
    fn from(outcome: &AddOutcome) -> Self {
        match outcome {
            AddOutcome::Introduced { name, quantity } => {
                Notice::success(format!("Added new item '{name}' ({quantity} on hand)"))
            }
            AddOutcome::Increased {
                name,
                added,
                quantity,
            } => Notice::success(format!("Increased '{name}' by {added} ({quantity} on hand)")),
        }
    }
}

impl From<&RemoveOutcome> for Notice {
    fn from(outcome: &RemoveOutcome) -> Self {
        match outcome {
            RemoveOutcome::Reduced {
                name,
                removed,
                quantity,
            } => Notice::success(format!("Removed {removed} of '{name}' ({quantity} left)")),
            RemoveOutcome::Removed { name, removed } => Notice::success(format!(
                "Removed '{name}' from inventory (all {removed} taken)"
            )),
        }
    }
}

/// Over-removal is a warning; every other rejection is an error.
impl From<&DomainError> for Notice {
    fn from(err: &DomainError) -> Self {
        let severity = match err.kind() {
            ErrorKind::InsufficientStock => Severity::Warning,
            ErrorKind::InvalidInput | ErrorKind::NotFound => Severity::Error,
        };
        Notice::new(severity, err.to_string())
    }
}

impl From<&ParseError> for Notice {
    fn from(err: &ParseError) -> Self {
        Notice::new(Severity::Error, err.to_string())
    }
}
