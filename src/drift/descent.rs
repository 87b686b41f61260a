use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::geo::{project_along_bearing, GeoLocation};
use crate::profile::direction::{band_fraction, interpolate_direction, lerp};
use crate::profile::{AltitudeReference, WindProfile, WindSample};
use crate::units::{feet_to_meters, knots_to_feet_per_second, normalize_degrees};
use super::band::{average_wind_direction, average_wind_speed, locate_band};
use super::simulation::LaunchPathPoint;

// ---------------------------------------------------------------------------
// Descent inputs
// ---------------------------------------------------------------------------

/// Descent parameters for one band, from `altitude` down to the next band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescentData {
    pub altitude: f64,       // ft AGL, top of band
    pub descent_rate: f64,   // ft/s
    pub wind_speed: f64,     // kt
    pub wind_direction: f64, // deg, blowing FROM
}

/// Recovery configuration: drogue rate above the main deployment altitude,
/// main rate below it. Equal rates give a single-rate descent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentProfile {
    pub drogue_rate: f64,          // ft/s
    pub main_rate: f64,            // ft/s
    pub main_deploy_altitude: f64, // ft AGL
}

impl DescentProfile {
    pub fn single(rate: f64) -> Self {
        Self { drogue_rate: rate, main_rate: rate, main_deploy_altitude: 0.0 }
    }

    pub fn dual(drogue_rate: f64, main_rate: f64, main_deploy_altitude: f64) -> Self {
        Self { drogue_rate, main_rate, main_deploy_altitude }
    }

    /// Rate for a band whose bottom sits at `bottom` ft AGL.
    pub fn rate_below(&self, bottom: f64) -> f64 {
        if bottom >= self.main_deploy_altitude {
            self.drogue_rate
        } else {
            self.main_rate
        }
    }
}

// ---------------------------------------------------------------------------
// Single drift step
// ---------------------------------------------------------------------------

/// Drift `location` across one band and return the drift distance, ft.
///
/// Wind direction is where the wind comes from, so the rocket moves toward
/// `direction + 180`. `None` (and no mutation) for a zero or NaN descent rate
/// or an unusable band height.
pub fn drift_step(
    location: &mut GeoLocation,
    wind_speed_knots: f64,
    wind_direction_degrees: f64,
    descent_rate_ft_per_sec: f64,
    band_height_feet: f64,
) -> Option<f64> {
    let rate = descent_rate_ft_per_sec.abs();
    let usable_height = band_height_feet.is_finite() && band_height_feet >= 0.0;
    if rate == 0.0 || !rate.is_finite() || !usable_height {
        return None;
    }

    let time_in_band = band_height_feet / rate;
    let drift_ft = knots_to_feet_per_second(wind_speed_knots) * time_in_band;
    if !drift_ft.is_finite() {
        return None;
    }

    let bearing = drift_bearing(wind_direction_degrees);
    project_along_bearing(location, feet_to_meters(drift_ft), bearing);
    Some(drift_ft)
}

fn drift_bearing(wind_direction_degrees: f64) -> f64 {
    normalize_degrees(wind_direction_degrees + 180.0)
}

// ---------------------------------------------------------------------------
// Band construction
// ---------------------------------------------------------------------------

/// Split the fall from `apogee` (ft AGL) to the ground into bands and give
/// each the profile's mean wind over it.
///
/// Band edges are the profile samples below apogee, apogee itself and the
/// main deployment altitude. Above the profile ceiling the top sample's
/// wind is held constant. Returned top-down.
///
/// An MSL profile is first re-fused above its ground elevation.
pub fn descent_bands(
    profile: &WindProfile,
    apogee: f64,
    descent: &DescentProfile,
) -> Vec<DescentData> {
    if profile.reference() == AltitudeReference::Msl {
        return descent_bands(&profile.to_agl(), apogee, descent);
    }
    let Some(top_sample) = profile.samples().last().copied() else {
        return Vec::new();
    };
    if !apogee.is_finite() || apogee <= 0.0 {
        return Vec::new();
    }

    let mut edges: Vec<f64> = profile
        .samples()
        .iter()
        .map(WindSample::altitude)
        .filter(|&a| a > 0.0 && a < apogee)
        .collect();
    edges.push(apogee);
    edges.push(0.0);
    if descent.main_deploy_altitude > 0.0 && descent.main_deploy_altitude < apogee {
        edges.push(descent.main_deploy_altitude);
    }
    edges.sort_by(|a, b| b.total_cmp(a));
    edges.dedup();

    edges
        .windows(2)
        .map(|pair| {
            let (top, bottom) = (pair[0], pair[1]);
            let (speed, direction) = band_wind(profile, &top_sample, bottom, top);
            DescentData {
                altitude: top,
                descent_rate: descent.rate_below(bottom),
                wind_speed: speed,
                wind_direction: direction,
            }
        })
        .collect()
}

/// Mean wind between `bottom` and `top`, which lie inside one sample pair.
fn band_wind(
    profile: &WindProfile,
    top_sample: &WindSample,
    bottom: f64,
    top: f64,
) -> (f64, f64) {
    let Some(band) = locate_band((top + bottom) / 2.0, profile) else {
        return (top_sample.speed(), top_sample.direction());
    };
    let floor = band.floor(profile);
    let ceiling = band.ceiling(profile);

    let at_bottom = band_fraction(floor.altitude(), ceiling.altitude(), bottom)
        .and_then(|f| {
            WindSample::new(
                bottom,
                lerp(floor.speed(), ceiling.speed(), f),
                interpolate_direction(floor.direction(), ceiling.direction(), f),
            )
            .ok()
        })
        .unwrap_or(*floor);

    let fraction = band_fraction(at_bottom.altitude(), ceiling.altitude(), top).unwrap_or(0.0);
    (
        average_wind_speed(fraction, &at_bottom, ceiling),
        average_wind_direction(fraction, &at_bottom, ceiling),
    )
}

// ---------------------------------------------------------------------------
// Descent projection
// ---------------------------------------------------------------------------

/// Result of folding the drift steps from apogee to the ground.
#[derive(Debug, Clone)]
pub struct DriftOutcome {
    pub landing: GeoLocation,
    pub path: Vec<LaunchPathPoint>,
    pub total_drift_ft: f64,
    pub displacement: Vector2<f64>, // m, [east, north]
    pub descent_time: f64,          // s
    pub skipped_bands: usize,
}

/// Drift from `start` (the point under apogee) through `bands`, top-down.
pub fn project_descent(start: GeoLocation, bands: &[DescentData]) -> DriftOutcome {
    let mut location = start;
    let mut path = Vec::with_capacity(bands.len() + 1);
    let mut total_drift_ft = 0.0;
    let mut displacement: Vector2<f64> = Vector2::zeros();
    let mut descent_time = 0.0;
    let mut skipped_bands = 0;

    if let Some(first) = bands.first() {
        path.push(LaunchPathPoint { altitude: first.altitude, location });
    }

    for (i, band) in bands.iter().enumerate() {
        let bottom = bands.get(i + 1).map_or(0.0, |b| b.altitude);
        let height = band.altitude - bottom;

        let step = drift_step(
            &mut location,
            band.wind_speed,
            band.wind_direction,
            band.descent_rate,
            height,
        );
        match step {
            Some(drift_ft) => {
                let bearing = drift_bearing(band.wind_direction).to_radians();
                let heading = Vector2::new(bearing.sin(), bearing.cos());
                displacement += heading * feet_to_meters(drift_ft);
                total_drift_ft += drift_ft;
                descent_time += height / band.descent_rate.abs();
            }
            None => {
                debug!(
                    "band {:.0}-{:.0} ft skipped (rate {})",
                    band.altitude, bottom, band.descent_rate
                );
                skipped_bands += 1;
            }
        }
        path.push(LaunchPathPoint { altitude: bottom, location });
    }

    DriftOutcome {
        landing: location,
        path,
        total_drift_ft,
        displacement,
        descent_time,
        skipped_bands,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
