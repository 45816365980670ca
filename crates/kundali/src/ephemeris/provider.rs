use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ephemeris::types::{Body, EclipticPosition};

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Body {body} is not supported by the {provider} ephemeris")]
    UnsupportedBody { body: String, provider: String },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: String,
        datetime: DateTime<Utc>,
        message: String,
    },
}

impl EphemerisError {
    /// The body the failure concerns, when there is one.
    pub fn body(&self) -> Option<&str> {
        match self {
            EphemerisError::FileNotFound { .. } => None,
            EphemerisError::UnsupportedBody { body, .. } => Some(body),
            EphemerisError::CalculationFailed { body, .. } => Some(body),
        }
    }
}

/// Source of raw geocentric body positions.
///
/// Implementations return apparent tropical ecliptic coordinates for the
/// requested instant. Lunar nodes are never queried through this trait.
pub trait EphemerisProvider: Send + Sync {
    fn name(&self) -> &str;

    fn position_of(
        &self,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError>;
}
