use serde::Serialize;

use crate::error::{Result, WindError};

// ---------------------------------------------------------------------------
// Geographic coordinate
// ---------------------------------------------------------------------------

/// Latitude/longitude pair in degrees.
///
/// Fields are private so every value went through [`GeoLocation::new`]. The
/// drift projection mutates a location in place through
/// [`crate::geo::geodesy::project_along_bearing`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    latitude: f64,   // deg, [-90, 90]
    longitude: f64,  // deg, [-180, 180]
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(WindError::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Overwrite both fields. Callers guarantee range and finiteness.
    pub(crate) fn set(&mut self, latitude: f64, longitude: f64) {
        debug_assert!(latitude.is_finite() && longitude.is_finite());
        self.latitude = latitude;
        self.longitude = longitude;
    }
}
