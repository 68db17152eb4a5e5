//! Error types for the eventplan ecosystem.

use std::fmt;

use thiserror::Error;

use crate::wizard::WizardStep;

/// Errors that can occur in eventplan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{reason}")]
    NavigationBlocked { target: WizardStep, reason: BlockReason },

    #[error("Invalid event: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid menu item: {0}")]
    InvalidMenuItem(String),
}

/// Result type alias for eventplan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Why a forward step transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    NoDates,
    NoEvents,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::NoDates => write!(f, "Please select at least one date before proceeding"),
            BlockReason::NoEvents => {
                write!(f, "Please add at least one event before proceeding to review")
            }
        }
    }
}

/// A single field-level problem with user-submitted event data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
