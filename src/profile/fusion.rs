use log::{debug, warn};

use super::direction::{band_fraction, interpolate_direction};
use super::forecast::Forecast;
use super::sample::{sort_by_altitude, WindSample};
use super::wind_profile::WindProfile;

// ---------------------------------------------------------------------------
// Profile fusion
// ---------------------------------------------------------------------------

/// Merge near-surface and upper-air samples into one ground-anchored profile.
///
/// Both inputs are AGL feet. `altitude_samples` come from fixed-height
/// forecast levels, `pressure_samples` from geopotential heights of pressure
/// levels with the ground elevation already subtracted (so they may be
/// negative where a pressure surface lies below the terrain).
///
/// Without any pressure sample the profile cannot be anchored and is empty.
pub fn fuse(
    source_model: &str,
    ground_elevation: f64,
    mut altitude_samples: Vec<WindSample>,
    mut pressure_samples: Vec<WindSample>,
) -> WindProfile {
    sort_by_altitude(&mut altitude_samples);
    sort_by_altitude(&mut pressure_samples);

    let Some(lowest) = pressure_samples.first().copied() else {
        warn!("{source_model}: no upper-air samples, profile left empty");
        return WindProfile::empty(source_model, ground_elevation);
    };

    let samples = if lowest.altitude() > 0.0 {
        merge_above_ground(&altitude_samples, pressure_samples, lowest)
    } else {
        match anchor_below_ground(pressure_samples) {
            Some(samples) => samples,
            None => {
                warn!("{source_model}: every upper-air sample is below ground, profile left empty");
                return WindProfile::empty(source_model, ground_elevation);
            }
        }
    };

    WindProfile::fused(source_model, ground_elevation, samples)
}

/// Lowest pressure surface is above ground: fill the gap with near-surface
/// samples and flat-line the lowest real sample down to 0 ft.
fn merge_above_ground(
    altitude_samples: &[WindSample],
    pressure_samples: Vec<WindSample>,
    lowest: WindSample,
) -> Vec<WindSample> {
    let mut out = Vec::with_capacity(altitude_samples.len() + pressure_samples.len() + 1);

    for sample in altitude_samples
        .iter()
        .filter(|s| s.altitude() >= 0.0 && s.altitude() < lowest.altitude())
    {
        if out.is_empty() {
            out.push(sample.at_altitude(0.0));
        }
        out.push(*sample);
    }

    if out.is_empty() {
        out.push(lowest.at_altitude(0.0));
    }
    out.extend(pressure_samples);
    out
}

/// Lowest pressure surface is at or below ground: interpolate a ground
/// sample from the pair straddling 0 ft and drop everything underground.
fn anchor_below_ground(pressure_samples: Vec<WindSample>) -> Option<Vec<WindSample>> {
    let first_above = pressure_samples
        .iter()
        .skip(1)
        .position(|s| s.altitude() > 0.0)?
        + 1;

    let below = pressure_samples[first_above - 1];
    let above = pressure_samples[first_above];
    let ground = ground_between(&below, &above)?;

    let mut out = Vec::with_capacity(pressure_samples.len() - first_above + 1);
    out.push(ground);
    out.extend_from_slice(&pressure_samples[first_above..]);
    Some(out)
}

/// Synthesized 0 ft sample between an at-or-below-ground sample and the
/// first sample above ground.
///
/// Speed grows from the smaller endpoint by the ratio of the underground
/// depth to the pair's height, matching the reference outputs.
fn ground_between(below: &WindSample, above: &WindSample) -> Option<WindSample> {
    let ratio = band_fraction(below.altitude(), above.altitude(), 0.0)?;
    let speed = below.speed().min(above.speed()) + ratio * (above.speed() - below.speed()).abs();
    let direction = interpolate_direction(below.direction(), above.direction(), ratio);
    WindSample::new(0.0, speed, direction).ok()
}

// ---------------------------------------------------------------------------
// Per-hour fusion over a parsed forecast
// ---------------------------------------------------------------------------

/// Fuse one forecast hour. Missing fields for a level skip that level only.
pub fn fuse_hour(forecast: &Forecast, hour: usize) -> WindProfile {
    let altitude_samples = forecast.height_samples(hour);
    let pressure_samples = forecast.pressure_samples(hour);
    debug!(
        "hour {hour}: {} near-surface and {} upper-air samples",
        altitude_samples.len(),
        pressure_samples.len()
    );
    fuse(
        forecast.model(),
        forecast.elevation_ft(),
        altitude_samples,
        pressure_samples,
    )
}

/// Fuse every requested hour the forecast actually covers.
pub fn fuse_hours<I>(forecast: &Forecast, hours: I) -> Vec<(usize, WindProfile)>
where
    I: IntoIterator<Item = usize>,
{
    hours
        .into_iter()
        .filter(|&h| {
            let covered = h < forecast.hour_count();
            if !covered {
                debug!("hour {h} is past the end of the forecast, skipped");
            }
            covered
        })
        .map(|h| (h, fuse_hour(forecast, h)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn s(alt: f64, speed: f64, dir: f64) -> WindSample {
        WindSample::new(alt, speed, dir).unwrap()
    }

    fn triples(p: &WindProfile) -> Vec<(f64, f64, f64)> {
        p.samples()
            .iter()
            .map(|s| (s.altitude(), s.speed(), s.direction()))
            .collect()
    }

    #[test]
    fn no_pressure_samples_gives_empty_profile() {
        let p = fuse("gfs", 0.0, vec![s(30.0, 5.0, 90.0)], vec![]);
        assert!(p.is_empty());
    }

    #[test]
    fn near_surface_samples_fill_gap_below_pressure_levels() {
        let p = fuse(
            "gfs",
            0.0,
            vec![s(100.0, 8.0, 80.0)],
            vec![s(500.0, 10.0, 90.0), s(1_500.0, 15.0, 100.0)],
        );
        assert_eq!(
            triples(&p),
            vec![
                (0.0, 8.0, 80.0),
                (100.0, 8.0, 80.0),
                (500.0, 10.0, 90.0),
                (1_500.0, 15.0, 100.0),
            ]
        );
        assert_eq!(p.ground_wind_speed(), 8.0);
        assert_eq!(p.ground_wind_direction(), 80.0);
    }

    #[test]
    fn near_surface_samples_above_lowest_level_are_dropped() {
        let p = fuse(
            "gfs",
            0.0,
            vec![s(600.0, 30.0, 10.0), s(100.0, 8.0, 80.0)],
            vec![s(500.0, 10.0, 90.0)],
        );
        assert_eq!(p.len(), 3);
        assert_eq!(p.samples()[2].altitude(), 500.0);
    }

    #[test]
    fn ground_copies_lowest_pressure_sample_without_near_surface_data() {
        let p = fuse("gfs", 0.0, vec![], vec![s(800.0, 12.0, 45.0), s(300.0, 9.0, 40.0)]);
        assert_eq!(
            triples(&p),
            vec![(0.0, 9.0, 40.0), (300.0, 9.0, 40.0), (800.0, 12.0, 45.0)]
        );
    }

    #[test]
    fn ground_interpolated_when_lowest_level_is_underground() {
        let p = fuse(
            "gfs",
            0.0,
            vec![s(30.0, 1.0, 1.0)],
            vec![s(-50.0, 10.0, 350.0), s(50.0, 14.0, 10.0)],
        );
        assert_eq!(p.len(), 2);
        let ground = p.samples()[0];
        assert_eq!(ground.altitude(), 0.0);
        assert!(ground.speed() > 10.0 && ground.speed() < 14.0);
        assert_abs_diff_eq!(ground.speed(), 12.0, epsilon = 1e-9);
        assert!(ground.direction() < 1e-6 || ground.direction() > 359.999);
        assert_eq!(p.samples()[1].altitude(), 50.0);
        assert_eq!(p.ground_wind_speed(), ground.speed());
    }

    #[test]
    fn underground_levels_below_the_bracket_are_discarded() {
        let p = fuse(
            "gfs",
            0.0,
            vec![],
            vec![
                s(-400.0, 3.0, 200.0),
                s(-100.0, 6.0, 200.0),
                s(300.0, 10.0, 220.0),
                s(900.0, 20.0, 240.0),
            ],
        );
        let t = triples(&p);
        assert_eq!(t.len(), 3);
        // ratio 100/400
        assert_abs_diff_eq!(t[0].1, 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t[0].2, 205.0, epsilon = 1e-9);
        assert_eq!(t[1].0, 300.0);
        assert_eq!(t[2].0, 900.0);
    }

    #[test]
    fn level_exactly_at_ground_anchors_directly() {
        let p = fuse("gfs", 0.0, vec![], vec![s(0.0, 4.0, 120.0), s(200.0, 8.0, 140.0)]);
        let ground = p.samples()[0];
        assert_eq!(ground.altitude(), 0.0);
        assert_abs_diff_eq!(ground.speed(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ground.direction(), 120.0, epsilon = 1e-12);
    }

    #[test]
    fn all_levels_underground_gives_empty_profile() {
        let p = fuse("gfs", 0.0, vec![], vec![s(-300.0, 4.0, 1.0), s(-10.0, 5.0, 2.0)]);
        assert!(p.is_empty());
    }

    #[test]
    fn fused_profile_is_ascending_and_anchored() {
        let p = fuse(
            "gfs",
            0.0,
            vec![s(59.0, 5.0, 10.0), s(32.8, 4.0, 5.0), s(393.7, 7.0, 20.0), s(262.5, 6.0, 15.0)],
            vec![s(2_000.0, 15.0, 30.0), s(450.0, 9.0, 25.0), s(450.0, 9.5, 26.0)],
        );
        assert_eq!(p.samples()[0].altitude(), 0.0);
        for pair in p.samples().windows(2) {
            assert!(pair[0].altitude() <= pair[1].altitude());
        }
    }
}
