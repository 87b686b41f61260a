use serde::Serialize;

use crate::error::{ensure_finite, Result};
use crate::units::normalize_degrees;

/// A single wind observation at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindSample {
    altitude: f64,   // ft
    speed: f64,      // kt unless the producer says otherwise
    direction: f64,  // deg from North, wind blowing FROM
}

impl WindSample {
    /// Build a sample; the direction is normalized into [0, 360).
    pub fn new(altitude: f64, speed: f64, direction: f64) -> Result<Self> {
        Ok(Self {
            altitude: ensure_finite("altitude", altitude)?,
            speed: ensure_finite("speed", speed)?,
            direction: normalize_degrees(ensure_finite("direction", direction)?),
        })
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// Same wind at another altitude.
    pub(crate) fn at_altitude(&self, altitude: f64) -> Self {
        Self { altitude, ..*self }
    }
}

/// Sort ascending by altitude. Stable, so equal altitudes keep input order.
pub(crate) fn sort_by_altitude(samples: &mut [WindSample]) {
    samples.sort_by(|a, b| a.altitude.total_cmp(&b.altitude));
}
