//! Crate error type.
//!
//! Input problems (`InvalidInput`, `Parse`, `UnknownDiscipline`) are user
//! errors. `InvariantViolation` means the engine produced something its own
//! rules forbid and is reported separately via [`Error::is_defect`].

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while loading, validating, simulating, or reducing.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before the simulation started.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The engine broke one of its own invariants.
    #[error("engine invariant violated: {0}")]
    InvariantViolation(String),

    /// A workload file line could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// An unrecognized discipline name.
    #[error("unknown scheduling discipline '{0}' (expected fcfs, rr or srtf)")]
    UnknownDiscipline(String),

    #[error("could not read workload: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse scenario TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("could not serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error signals an engine defect rather than bad input.
    pub fn is_defect(&self) -> bool {
        matches!(self, Error::InvariantViolation(_))
    }

    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Error::InvalidInput(errors) => errors,
            _ => &[],
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Error::InvariantViolation(message.into())
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
