use serde::{Deserialize, Serialize};

use super::fusion;
use super::sample::{sort_by_altitude, WindSample};

/// Frame a profile's sample altitudes are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AltitudeReference {
    #[serde(rename = "MSL")]
    Msl,
    #[default]
    #[serde(rename = "AGL")]
    Agl,
}

// ---------------------------------------------------------------------------
// Wind profile
// ---------------------------------------------------------------------------

/// Ascending list of wind samples for one forecast hour at one site.
///
/// A fused profile is AGL-referenced: altitudes never decrease and the first
/// sample sits at 0 ft. Profiles are filled once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindProfile {
    source_model: String,
    samples: Vec<WindSample>,
    ground_elevation: f64,     // ft MSL
    ground_wind_speed: f64,    // kt
    ground_wind_direction: f64, // deg
    reference: AltitudeReference,
}

impl WindProfile {
    /// An AGL profile with no samples.
    pub fn empty(source_model: impl Into<String>, ground_elevation: f64) -> Self {
        Self {
            source_model: source_model.into(),
            samples: Vec::new(),
            ground_elevation,
            ground_wind_speed: 0.0,
            ground_wind_direction: 0.0,
            reference: AltitudeReference::Agl,
        }
    }

    /// Populate a fused profile. `samples[0]` is the synthesized ground sample.
    pub(crate) fn fused(
        source_model: impl Into<String>,
        ground_elevation: f64,
        samples: Vec<WindSample>,
    ) -> Self {
        let ground = samples.first().copied();
        Self {
            source_model: source_model.into(),
            ground_elevation,
            ground_wind_speed: ground.map_or(0.0, |g| g.speed()),
            ground_wind_direction: ground.map_or(0.0, |g| g.direction()),
            samples,
            reference: AltitudeReference::Agl,
        }
    }

    /// Profile from a single altitude series measured above sea level.
    ///
    /// Samples sharing an altitude are collapsed to the first one seen. The
    /// result is not ground-anchored; see [`WindProfile::to_agl`].
    pub fn from_msl_series(
        source_model: impl Into<String>,
        ground_elevation: f64,
        mut samples: Vec<WindSample>,
    ) -> Self {
        sort_by_altitude(&mut samples);
        samples.dedup_by(|later, earlier| later.altitude() == earlier.altitude());
        let lowest = samples.first().copied();
        Self {
            source_model: source_model.into(),
            ground_elevation,
            ground_wind_speed: lowest.map_or(0.0, |s| s.speed()),
            ground_wind_direction: lowest.map_or(0.0, |s| s.direction()),
            samples,
            reference: AltitudeReference::Msl,
        }
    }

    /// Ground-anchored copy. MSL series are shifted by the ground elevation
    /// and run through the fusion engine as upper-air samples.
    pub fn to_agl(&self) -> WindProfile {
        match self.reference {
            AltitudeReference::Agl => self.clone(),
            AltitudeReference::Msl => {
                let shifted: Vec<WindSample> = self
                    .samples
                    .iter()
                    .map(|s| s.at_altitude(s.altitude() - self.ground_elevation))
                    .collect();
                fusion::fuse(&self.source_model, self.ground_elevation, Vec::new(), shifted)
            }
        }
    }

    pub fn source_model(&self) -> &str {
        &self.source_model
    }

    pub fn samples(&self) -> &[WindSample] {
        &self.samples
    }

    pub fn ground_elevation(&self) -> f64 {
        self.ground_elevation
    }

    pub fn ground_wind_speed(&self) -> f64 {
        self.ground_wind_speed
    }

    pub fn ground_wind_direction(&self) -> f64 {
        self.ground_wind_direction
    }

    pub fn reference(&self) -> AltitudeReference {
        self.reference
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Highest sample altitude, in the profile's own frame.
    pub fn ceiling(&self) -> Option<f64> {
        self.samples.last().map(|s| s.altitude())
    }

    /// Altitude of a sample above mean sea level, ft.
    pub fn msl_altitude(&self, sample: &WindSample) -> f64 {
        match self.reference {
            AltitudeReference::Msl => sample.altitude(),
            AltitudeReference::Agl => sample.altitude() + self.ground_elevation,
        }
    }
}
