use thiserror::Error;

/// Result type for wind profile operations.
pub type Result<T> = std::result::Result<T, WindError>;

/// Errors raised while constructing values or reading forecast data.
///
/// Degenerate numeric situations (zero-height bands, altitudes outside the
/// profile, zero descent rate) are not errors: they come back as `None`.
#[derive(Error, Debug)]
pub enum WindError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid hour '{0}' (expected 0-23)")]
    InvalidHour(String),

    #[error("end hour {end} is before start hour {start}")]
    HourOrder { start: u32, end: u32 },

    #[error("forecast is missing '{0}'")]
    MissingField(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject NaN and infinities for a named numeric field.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WindError::NonFinite { field, value })
    }
}
