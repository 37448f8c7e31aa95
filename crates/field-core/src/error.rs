use thiserror::Error;

/// Errors surfaced while configuring a field or talking to its surface.
///
/// None of these are fatal to the host page: the web front-end logs them and
/// falls back to an inert handle or a degraded surface.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid field options: {0}")]
    InvalidOptions(String),
    #[error("could not parse field options: {0}")]
    OptionsJson(#[from] serde_json::Error),
    #[error("surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, FieldError>;
