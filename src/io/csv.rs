use std::io::{self, Write};

use crate::profile::direction::{band_fraction, interpolate_direction, lerp};
use crate::profile::{AltitudeReference, WindProfile, WindSample};
use crate::units::DirectionUnit;
use super::config::ExportConfig;

/// Write a wind profile as delimited text.
///
/// Columns: altitude, speed, direction, standard deviation, in the units and
/// order `config` names. One header line, then one line per sample.
pub fn write_profile<W: Write>(
    writer: &mut W,
    profile: &WindProfile,
    config: &ExportConfig,
) -> io::Result<()> {
    writeln!(writer, "{}", config.header())?;

    let sep = config.separator.as_str();
    let std_dev = config.std_dev_clamped();
    for row in rows(profile, config.reference) {
        writeln!(
            writer,
            "{:.*}{sep}{:.*}{sep}{:.*}{sep}{:.2}",
            config.altitude_unit.precision(),
            config.altitude_unit.from_feet(row.altitude()),
            config.speed_unit.precision(),
            config.speed_unit.from_knots(row.speed()),
            config.direction_unit.precision(),
            direction_value(config.direction_unit, row.direction()),
            std_dev,
        )?;
    }

    Ok(())
}

/// Render to a `String`.
pub fn format_profile(profile: &WindProfile, config: &ExportConfig) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_profile(&mut buf, profile, config);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write to a file at the given path.
pub fn write_profile_file(
    path: &str,
    profile: &WindProfile,
    config: &ExportConfig,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_profile(&mut file, profile, config)
}

/// Direction in `unit`, rounded to its printed precision and kept below a
/// full turn, so 359.97 deg prints as 0.0 rather than 360.0.
fn direction_value(unit: DirectionUnit, degrees: f64) -> f64 {
    let scale = 10f64.powi(unit.precision() as i32);
    let round = |v: f64| (v * scale).round() / scale;
    let value = round(unit.from_degrees(degrees));
    if value >= round(unit.from_degrees(360.0)) {
        0.0
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Samples re-expressed in the output frame (altitudes in ft).
///
/// In AGL, samples below ground are dropped; the last one before the first
/// above-ground sample is replaced by an interpolated 0 ft row.
fn rows(profile: &WindProfile, reference: AltitudeReference) -> Vec<WindSample> {
    let ground = profile.ground_elevation();
    let adjusted: Vec<WindSample> = profile
        .samples()
        .iter()
        .map(|s| {
            let msl = profile.msl_altitude(s);
            match reference {
                AltitudeReference::Msl => s.at_altitude(msl),
                AltitudeReference::Agl => s.at_altitude(msl - ground),
            }
        })
        .collect();

    if reference == AltitudeReference::Msl {
        return adjusted;
    }

    let mut out = Vec::with_capacity(adjusted.len());
    for (i, sample) in adjusted.iter().enumerate() {
        if sample.altitude() >= 0.0 {
            out.push(*sample);
            continue;
        }
        let Some(next) = adjusted.get(i + 1).filter(|n| n.altitude() > 0.0) else {
            continue;
        };
        if let Some(ratio) = band_fraction(sample.altitude(), next.altitude(), 0.0) {
            if let Ok(zero) = WindSample::new(
                0.0,
                lerp(sample.speed(), next.speed(), ratio),
                interpolate_direction(sample.direction(), next.direction(), ratio),
            ) {
                out.push(zero);
            }
        }
    }
    out
}
