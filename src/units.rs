use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Conversion constants
// ---------------------------------------------------------------------------

pub const FEET_TO_METERS: f64 = 0.3048;
pub const KNOTS_TO_FEET_PER_SECOND: f64 = 1.68781;
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;
pub const FEET_PER_MILE: f64 = 5280.0;
pub const FEET_PER_YARD: f64 = 3.0;

const KNOTS_TO_METERS_PER_SECOND: f64 = METERS_PER_NAUTICAL_MILE / 3600.0;
const KNOTS_TO_MILES_PER_HOUR: f64 = METERS_PER_NAUTICAL_MILE / (FEET_PER_MILE * FEET_TO_METERS);

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * FEET_TO_METERS
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters / FEET_TO_METERS
}

pub fn knots_to_feet_per_second(knots: f64) -> f64 {
    knots * KNOTS_TO_FEET_PER_SECOND
}

/// Normalize an angle in degrees into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}

// ---------------------------------------------------------------------------
// Export unit selections
// ---------------------------------------------------------------------------

/// Altitude output unit. Profile altitudes are stored in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AltitudeUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[default]
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "yd")]
    Yards,
    #[serde(rename = "mi")]
    Miles,
    #[serde(rename = "nmi")]
    NauticalMiles,
}

impl AltitudeUnit {
    pub const ALL: [AltitudeUnit; 6] = [
        AltitudeUnit::Meters,
        AltitudeUnit::Kilometers,
        AltitudeUnit::Feet,
        AltitudeUnit::Yards,
        AltitudeUnit::Miles,
        AltitudeUnit::NauticalMiles,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_feet(self, feet: f64) -> f64 {
        match self {
            AltitudeUnit::Meters => feet_to_meters(feet),
            AltitudeUnit::Kilometers => feet_to_meters(feet) / 1000.0,
            AltitudeUnit::Feet => feet,
            AltitudeUnit::Yards => feet / FEET_PER_YARD,
            AltitudeUnit::Miles => feet / FEET_PER_MILE,
            AltitudeUnit::NauticalMiles => feet_to_meters(feet) / METERS_PER_NAUTICAL_MILE,
        }
    }

    pub fn to_feet(self, value: f64) -> f64 {
        match self {
            AltitudeUnit::Meters => meters_to_feet(value),
            AltitudeUnit::Kilometers => meters_to_feet(value * 1000.0),
            AltitudeUnit::Feet => value,
            AltitudeUnit::Yards => value * FEET_PER_YARD,
            AltitudeUnit::Miles => value * FEET_PER_MILE,
            AltitudeUnit::NauticalMiles => meters_to_feet(value * METERS_PER_NAUTICAL_MILE),
        }
    }

    /// Decimal places written for this unit (coarser units need more).
    pub fn precision(self) -> usize {
        match self {
            AltitudeUnit::Meters | AltitudeUnit::Feet | AltitudeUnit::Yards => 1,
            AltitudeUnit::Kilometers => 4,
            AltitudeUnit::Miles | AltitudeUnit::NauticalMiles => 5,
        }
    }
}

/// Speed output unit. Profile speeds are stored in knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "ft/s")]
    FeetPerSecond,
    #[serde(rename = "mph")]
    MilesPerHour,
    #[default]
    #[serde(rename = "kt")]
    Knots,
}

impl SpeedUnit {
    pub const ALL: [SpeedUnit; 5] = [
        SpeedUnit::MetersPerSecond,
        SpeedUnit::KilometersPerHour,
        SpeedUnit::FeetPerSecond,
        SpeedUnit::MilesPerHour,
        SpeedUnit::Knots,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_knots(self, knots: f64) -> f64 {
        match self {
            SpeedUnit::MetersPerSecond => knots * KNOTS_TO_METERS_PER_SECOND,
            SpeedUnit::KilometersPerHour => knots * METERS_PER_NAUTICAL_MILE / 1000.0,
            SpeedUnit::FeetPerSecond => knots_to_feet_per_second(knots),
            SpeedUnit::MilesPerHour => knots * KNOTS_TO_MILES_PER_HOUR,
            SpeedUnit::Knots => knots,
        }
    }

    pub fn to_knots(self, value: f64) -> f64 {
        match self {
            SpeedUnit::MetersPerSecond => value / KNOTS_TO_METERS_PER_SECOND,
            SpeedUnit::KilometersPerHour => value * 1000.0 / METERS_PER_NAUTICAL_MILE,
            SpeedUnit::FeetPerSecond => value / KNOTS_TO_FEET_PER_SECOND,
            SpeedUnit::MilesPerHour => value / KNOTS_TO_MILES_PER_HOUR,
            SpeedUnit::Knots => value,
        }
    }

    /// Unit named by a forecast provider's `hourly_units` entry.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "kn" | "kt" | "kts" | "knots" => Some(SpeedUnit::Knots),
            "km/h" | "kmh" => Some(SpeedUnit::KilometersPerHour),
            "m/s" | "ms" => Some(SpeedUnit::MetersPerSecond),
            "mph" | "mp/h" => Some(SpeedUnit::MilesPerHour),
            "ft/s" => Some(SpeedUnit::FeetPerSecond),
            _ => None,
        }
    }

    /// Largest standard deviation the target tool accepts, in this unit.
    pub fn max_std_dev(self) -> f64 {
        match self {
            SpeedUnit::MetersPerSecond => 2.0,
            SpeedUnit::KilometersPerHour => 7.2,
            SpeedUnit::FeetPerSecond => 6.56,
            SpeedUnit::MilesPerHour => 4.47,
            SpeedUnit::Knots => 3.89,
        }
    }

    pub fn precision(self) -> usize {
        2
    }
}

/// Direction output unit. Profile directions are stored in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectionUnit {
    #[default]
    #[serde(rename = "deg")]
    Degrees,
    #[serde(rename = "rad")]
    Radians,
    #[serde(rename = "arcmin")]
    Arcminutes,
}

impl DirectionUnit {
    pub const ALL: [DirectionUnit; 3] =
        [DirectionUnit::Degrees, DirectionUnit::Radians, DirectionUnit::Arcminutes];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_degrees(self, degrees: f64) -> f64 {
        match self {
            DirectionUnit::Degrees => degrees,
            DirectionUnit::Radians => degrees.to_radians(),
            DirectionUnit::Arcminutes => degrees * 60.0,
        }
    }

    pub fn to_degrees(self, value: f64) -> f64 {
        match self {
            DirectionUnit::Degrees => value,
            DirectionUnit::Radians => value.to_degrees(),
            DirectionUnit::Arcminutes => value / 60.0,
        }
    }

    pub fn precision(self) -> usize {
        match self {
            DirectionUnit::Degrees => 1,
            DirectionUnit::Radians => 4,
            DirectionUnit::Arcminutes => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn feet_meters_factor() {
        assert_relative_eq!(feet_to_meters(1000.0), 304.8, epsilon = 1e-9);
        assert_relative_eq!(meters_to_feet(304.8), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn altitude_units_recover_feet() {
        for unit in AltitudeUnit::ALL {
            let back = unit.to_feet(unit.from_feet(12_345.0));
            assert_relative_eq!(back, 12_345.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn speed_units_recover_knots() {
        for unit in SpeedUnit::ALL {
            let back = unit.to_knots(unit.from_knots(17.5));
            assert_relative_eq!(back, 17.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn direction_units_recover_degrees() {
        for unit in DirectionUnit::ALL {
            let back = unit.to_degrees(unit.from_degrees(271.25));
            assert_relative_eq!(back, 271.25, epsilon = 1e-9);
        }
    }

    #[test]
    fn known_speed_values() {
        assert_relative_eq!(SpeedUnit::KilometersPerHour.from_knots(10.0), 18.52, epsilon = 1e-9);
        assert_relative_eq!(SpeedUnit::MetersPerSecond.from_knots(1.0), 0.514_444, epsilon = 1e-6);
        assert_relative_eq!(SpeedUnit::MilesPerHour.from_knots(1.0), 1.150_779, epsilon = 1e-6);
    }

    #[test]
    fn std_dev_limits_agree_across_units() {
        // every limit describes roughly the same 2 m/s ceiling
        let base = SpeedUnit::MetersPerSecond.to_knots(2.0);
        for unit in SpeedUnit::ALL {
            let knots = unit.to_knots(unit.max_std_dev());
            assert!((knots - base).abs() < 0.01, "{:?} limit off: {}", unit, knots);
        }
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert_relative_eq!(normalize_degrees(370.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_degrees(-10.0), 350.0, epsilon = 1e-12);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn provider_speed_labels() {
        assert_eq!(SpeedUnit::from_label("kn"), Some(SpeedUnit::Knots));
        assert_eq!(SpeedUnit::from_label("km/h"), Some(SpeedUnit::KilometersPerHour));
        assert_eq!(SpeedUnit::from_label("m/s"), Some(SpeedUnit::MetersPerSecond));
        assert_eq!(SpeedUnit::from_label("mph"), Some(SpeedUnit::MilesPerHour));
        assert_eq!(SpeedUnit::from_label("furlong/fortnight"), None);
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert_eq!(AltitudeUnit::from_index(6), None);
        assert_eq!(SpeedUnit::from_index(4), Some(SpeedUnit::Knots));
        assert_eq!(DirectionUnit::from_index(9), None);
    }
}
