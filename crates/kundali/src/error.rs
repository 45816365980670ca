use thiserror::Error;

use crate::ephemeris::EphemerisError;

/// Errors surfaced by chart computation.
///
/// None of these are retried internally; the caller decides whether a
/// failed request is worth another attempt.
#[derive(Error, Debug)]
pub enum KundaliError {
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
    #[error("Ephemeris unavailable for {body} during {stage}: {message}")]
    EphemerisUnavailable {
        body: String,
        stage: String,
        message: String,
    },
    #[error("Computation failed during {stage}: {message}")]
    Computation { stage: String, message: String },
    #[error("Request limit reached for {key}")]
    RateLimited { key: String },
}

impl KundaliError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        KundaliError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn computation(stage: &str, message: impl Into<String>) -> Self {
        KundaliError::Computation {
            stage: stage.to_string(),
            message: message.into(),
        }
    }
}

impl From<EphemerisError> for KundaliError {
    fn from(err: EphemerisError) -> Self {
        let body = err.body().unwrap_or("unknown").to_string();
        KundaliError::EphemerisUnavailable {
            body,
            stage: "ephemeris lookup".to_string(),
            message: err.to_string(),
        }
    }
}
