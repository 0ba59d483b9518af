//! Error types for A/B test runs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbTestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown persona: '{0}' (expected single_mother, young_male or elderly_retiree)")]
    UnknownPersona(String),

    #[error("Stage '{stage}' requires '{field}', which an earlier stage has not populated")]
    MissingState {
        stage: &'static str,
        field: &'static str,
    },

    #[error("Incomplete response set: expected {expected} persona responses, got {actual}")]
    IncompleteResponses { expected: usize, actual: usize },

    #[error("Duplicate response for variant {variant} and persona {persona}")]
    DuplicateResponse { variant: String, persona: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AbTestError>;

impl From<serde_json::Error> for AbTestError {
    fn from(e: serde_json::Error) -> Self {
        AbTestError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for AbTestError {
    fn from(e: serde_yaml::Error) -> Self {
        AbTestError::Serialization(e.to_string())
    }
}
