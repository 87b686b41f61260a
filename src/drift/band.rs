use crate::profile::direction::{band_fraction, interpolate_direction, lerp};
use crate::profile::{WindProfile, WindSample};

/// Position of an altitude inside a profile: the lower sample of the
/// enclosing pair and how far up the pair the altitude sits (0..=1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub floor_index: usize,
    pub fraction: f64,
}

impl Band {
    pub fn floor<'a>(&self, profile: &'a WindProfile) -> &'a WindSample {
        &profile.samples()[self.floor_index]
    }

    pub fn ceiling<'a>(&self, profile: &'a WindProfile) -> &'a WindSample {
        &profile.samples()[self.floor_index + 1]
    }
}

// ---------------------------------------------------------------------------
// Band lookup
// ---------------------------------------------------------------------------

/// Find the sample pair enclosing `altitude` (profile frame, ft).
///
/// `None` when the altitude is below the first or above the last sample, or
/// when only zero-height pairs enclose it. Zero-height pairs (duplicate
/// altitudes) are stepped over, never interpolated across.
pub fn locate_band(altitude: f64, profile: &WindProfile) -> Option<Band> {
    if !altitude.is_finite() {
        return None;
    }
    profile
        .samples()
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].altitude() <= altitude && altitude <= pair[1].altitude())
        .find_map(|(i, pair)| {
            band_fraction(pair[0].altitude(), pair[1].altitude(), altitude).map(|fraction| Band {
                floor_index: i,
                fraction,
            })
        })
}

// ---------------------------------------------------------------------------
// Band averages
// ---------------------------------------------------------------------------

/// Mean wind speed between the floor and the fractional position: the
/// average of the floor speed and the interpolated speed.
pub fn average_wind_speed(fraction: f64, floor: &WindSample, ceiling: &WindSample) -> f64 {
    let interpolated = lerp(floor.speed(), ceiling.speed(), fraction);
    (floor.speed() + interpolated) / 2.0
}

/// Representative bearing between the floor and the fractional position,
/// wrap-aware on both the interpolation and the averaging.
pub fn average_wind_direction(fraction: f64, floor: &WindSample, ceiling: &WindSample) -> f64 {
    let interpolated = interpolate_direction(floor.direction(), ceiling.direction(), fraction);
    interpolate_direction(floor.direction(), interpolated, 0.5)
}

/// Interpolated (not averaged) wind at an altitude inside the profile.
pub fn wind_at(altitude: f64, profile: &WindProfile) -> Option<WindSample> {
    let band = locate_band(altitude, profile)?;
    let floor = band.floor(profile);
    let ceiling = band.ceiling(profile);
    WindSample::new(
        altitude,
        lerp(floor.speed(), ceiling.speed(), band.fraction),
        interpolate_direction(floor.direction(), ceiling.direction(), band.fraction),
    )
    .ok()
}
