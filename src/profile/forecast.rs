use std::collections::HashMap;

use chrono::NaiveDateTime;
use log::debug;
use serde::Deserialize;

use crate::error::{Result, WindError};
use crate::units::{meters_to_feet, SpeedUnit};
use super::sample::WindSample;

/// Fixed forecast heights above ground, m.
pub const HEIGHT_LEVELS_M: [u32; 4] = [10, 80, 120, 180];

/// Standard pressure levels, hPa, surface upwards.
pub const PRESSURE_LEVELS_HPA: [u32; 19] = [
    1000, 975, 950, 925, 900, 850, 800, 700, 600, 500, 400, 300, 250, 200, 150, 100, 70, 50, 30,
];

#[derive(Debug, Deserialize)]
struct RawForecast {
    elevation: Option<f64>,
    hourly: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    hourly_units: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Parsed forecast
// ---------------------------------------------------------------------------

/// Hourly forecast columns for one site, keyed by provider field name.
///
/// Values are indexed by hour offset from the first forecast hour. Nulls,
/// non-numeric entries and short arrays all read back as `None`. Wind speeds
/// are held in knots.
#[derive(Debug, Clone)]
pub struct Forecast {
    model: String,
    elevation_m: f64,
    times: Vec<String>,
    fields: HashMap<String, Vec<Option<f64>>>,
}

impl Forecast {
    /// Parse an Open-Meteo style response (`elevation` plus an `hourly` object
    /// of arrays). Unknown or non-array members of `hourly` are ignored.
    ///
    /// `wind_speed_*` columns are converted to knots from the unit named in
    /// `hourly_units`. A column with no unit entry, or one not recognised, is
    /// read as knots.
    pub fn from_json(text: &str, model: impl Into<String>) -> Result<Self> {
        let raw: RawForecast = serde_json::from_str(text)?;
        let elevation_m = raw.elevation.ok_or(WindError::MissingField("elevation"))?;
        let hourly = raw.hourly.ok_or(WindError::MissingField("hourly"))?;

        let mut times = Vec::new();
        let mut fields = HashMap::with_capacity(hourly.len());
        for (name, value) in hourly {
            let serde_json::Value::Array(items) = value else {
                debug!("hourly.{name} is not an array, ignored");
                continue;
            };
            if name == "time" {
                times = items
                    .iter()
                    .map(|v| v.as_str().unwrap_or_default().to_string())
                    .collect();
            } else {
                let unit = speed_unit(&name, &raw.hourly_units);
                let column = items
                    .iter()
                    .map(|v| v.as_f64().map(|x| unit.to_knots(x)))
                    .collect();
                fields.insert(name, column);
            }
        }

        Ok(Self {
            model: model.into(),
            elevation_m,
            times,
            fields,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn elevation_ft(&self) -> f64 {
        meters_to_feet(self.elevation_m)
    }

    /// Timestamp label of an hour, when the provider sent one.
    pub fn time_label(&self, hour: usize) -> Option<&str> {
        self.times.get(hour).map(String::as_str)
    }

    /// Number of forecast hours: the `time` column, else the longest field.
    pub fn hour_count(&self) -> usize {
        if !self.times.is_empty() {
            return self.times.len();
        }
        self.fields.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Hour offset whose `time` label (`YYYY-MM-DDTHH:MM`) matches `at`.
    pub fn hour_index(&self, at: NaiveDateTime) -> Option<usize> {
        self.times.iter().position(|label| {
            NaiveDateTime::parse_from_str(label, "%Y-%m-%dT%H:%M").is_ok_and(|t| t == at)
        })
    }

    pub fn value(&self, field: &str, hour: usize) -> Option<f64> {
        self.fields
            .get(field)
            .and_then(|col| col.get(hour).copied().flatten())
            .filter(|v| v.is_finite())
    }

    /// Near-surface samples for an hour, altitude in ft AGL.
    pub fn height_samples(&self, hour: usize) -> Vec<WindSample> {
        HEIGHT_LEVELS_M
            .iter()
            .filter_map(|&h| {
                let speed = self.value(&format!("wind_speed_{h}m"), hour);
                let direction = self.value(&format!("wind_direction_{h}m"), hour);
                match (speed, direction) {
                    (Some(v), Some(d)) => WindSample::new(meters_to_feet(h as f64), v, d).ok(),
                    _ => {
                        debug!("hour {hour}: {h} m level incomplete, skipped");
                        None
                    }
                }
            })
            .collect()
    }

    /// Upper-air samples for an hour. Altitude is the geopotential height in
    /// feet minus the ground elevation, so it can be negative.
    pub fn pressure_samples(&self, hour: usize) -> Vec<WindSample> {
        let ground_ft = self.elevation_ft();
        PRESSURE_LEVELS_HPA
            .iter()
            .filter_map(|&p| {
                let speed = self.value(&format!("wind_speed_{p}hPa"), hour);
                let direction = self.value(&format!("wind_direction_{p}hPa"), hour);
                let height = self.value(&format!("geopotential_height_{p}hPa"), hour);
                match (speed, direction, height) {
                    (Some(v), Some(d), Some(z)) => {
                        WindSample::new(meters_to_feet(z) - ground_ft, v, d).ok()
                    }
                    _ => {
                        debug!("hour {hour}: {p} hPa level incomplete, skipped");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Unit of a hourly column: knots for everything but a recognised speed unit.
fn speed_unit(name: &str, units: &HashMap<String, serde_json::Value>) -> SpeedUnit {
    if !name.starts_with("wind_speed_") {
        return SpeedUnit::Knots;
    }
    let Some(label) = units.get(name).and_then(serde_json::Value::as_str) else {
        return SpeedUnit::Knots;
    };
    SpeedUnit::from_label(label).unwrap_or_else(|| {
        debug!("hourly.{name}: unknown speed unit {label:?}, read as knots");
        SpeedUnit::Knots
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SAMPLE: &str = r#"{
        "latitude": 35.0,
        "longitude": -117.0,
        "elevation": 609.6,
        "hourly": {
            "time": ["2024-06-02T00:00", "2024-06-02T01:00"],
            "wind_speed_10m": [5.0, 6.0],
            "wind_direction_10m": [180.0, 190.0],
            "wind_speed_80m": [7.0, null],
            "wind_direction_80m": [185.0, 195.0],
            "wind_speed_850hPa": [12.0, 13.0],
            "wind_direction_850hPa": [200.0, 205.0],
            "geopotential_height_850hPa": [1524.0, 1530.0],
            "wind_speed_700hPa": [20.0],
            "wind_direction_700hPa": [220.0],
            "geopotential_height_700hPa": [3048.0]
        },
        "hourly_units": {"wind_speed_10m": "kn"}
    }"#;

    #[test]
    fn parses_open_meteo_shape() {
        let f = Forecast::from_json(SAMPLE, "gfs_seamless").unwrap();
        assert_eq!(f.model(), "gfs_seamless");
        assert_eq!(f.hour_count(), 2);
        assert_eq!(f.time_label(1), Some("2024-06-02T01:00"));
        assert_abs_diff_eq!(f.elevation_m(), 609.6, epsilon = 1e-12);
        assert_abs_diff_eq!(f.elevation_ft(), 2_000.0, epsilon = 1e-9);
    }

    #[test]
    fn speeds_converted_to_knots_from_hourly_units() {
        let text = r#"{
            "elevation": 0.0,
            "hourly": {
                "wind_speed_10m": [18.52],
                "wind_direction_10m": [90.0],
                "wind_speed_850hPa": [37.04],
                "wind_direction_850hPa": [90.0],
                "geopotential_height_850hPa": [1500.0],
                "wind_speed_700hPa": [10.0],
                "wind_direction_700hPa": [90.0],
                "geopotential_height_700hPa": [3000.0]
            },
            "hourly_units": {
                "wind_speed_10m": "km/h",
                "wind_speed_850hPa": "km/h",
                "wind_speed_700hPa": "m/s",
                "geopotential_height_850hPa": "m"
            }
        }"#;
        let f = Forecast::from_json(text, "gfs").unwrap();
        assert_abs_diff_eq!(f.height_samples(0)[0].speed(), 10.0, epsilon = 1e-9);
        let p = f.pressure_samples(0);
        assert_abs_diff_eq!(p[0].speed(), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p[1].speed(), 19.438_445, epsilon = 1e-6);
        // heights are not speeds
        assert_abs_diff_eq!(p[0].altitude(), 1_500.0 / 0.3048, epsilon = 1e-9);
    }

    #[test]
    fn unknown_speed_unit_reads_as_knots() {
        let text = r#"{
            "elevation": 0.0,
            "hourly": {"wind_speed_10m": [7.0], "wind_direction_10m": [90.0]},
            "hourly_units": {"wind_speed_10m": "beaufort"}
        }"#;
        let f = Forecast::from_json(text, "gfs").unwrap();
        assert_eq!(f.height_samples(0)[0].speed(), 7.0);
    }

    #[test]
    fn hour_index_from_time_labels() {
        let f = Forecast::from_json(SAMPLE, "gfs").unwrap();
        let at = NaiveDateTime::parse_from_str("2024-06-02T01:00", "%Y-%m-%dT%H:%M").unwrap();
        assert_eq!(f.hour_index(at), Some(1));
        let later = NaiveDateTime::parse_from_str("2024-06-03T01:00", "%Y-%m-%dT%H:%M").unwrap();
        assert_eq!(f.hour_index(later), None);
    }

    #[test]
    fn incomplete_levels_are_skipped() {
        let f = Forecast::from_json(SAMPLE, "gfs").unwrap();
        assert_eq!(f.height_samples(0).len(), 2);
        // 80 m speed is null in hour 1
        assert_eq!(f.height_samples(1).len(), 1);
        assert_eq!(f.pressure_samples(0).len(), 2);
        // 700 hPa arrays are too short for hour 1
        assert_eq!(f.pressure_samples(1).len(), 1);
        assert!(f.pressure_samples(7).is_empty());
    }

    #[test]
    fn pressure_altitude_is_above_ground() {
        let f = Forecast::from_json(SAMPLE, "gfs").unwrap();
        let p = f.pressure_samples(0);
        // 1524 m = 5000 ft, ground 2000 ft
        assert_abs_diff_eq!(p[0].altitude(), 3_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[1].altitude(), 8_000.0, epsilon = 1e-6);
    }

    #[test]
    fn height_levels_in_feet() {
        let f = Forecast::from_json(SAMPLE, "gfs").unwrap();
        let h = f.height_samples(0);
        assert_abs_diff_eq!(h[0].altitude(), 32.808, epsilon = 1e-3);
    }

    #[test]
    fn missing_sections_are_errors() {
        assert!(matches!(
            Forecast::from_json(r#"{"hourly": {}}"#, "x"),
            Err(WindError::MissingField("elevation"))
        ));
        assert!(matches!(
            Forecast::from_json(r#"{"elevation": 1.0}"#, "x"),
            Err(WindError::MissingField("hourly"))
        ));
        assert!(matches!(Forecast::from_json("not json", "x"), Err(WindError::Json(_))));
    }
}
