use std::io::Write;

use serde::Serialize;

use crate::drift::{DriftOutcome, LaunchSimulation};
use crate::error::Result;
use crate::geo::{great_circle_distance, initial_bearing, GeoLocation};

/// Landing prediction for one forecast hour.
#[derive(Debug, Clone, Serialize)]
pub struct DriftSummary {
    pub hour: usize,
    pub model: String,
    pub launch: GeoLocation,
    pub landing: GeoLocation,
    pub apogee_ft: f64,
    pub drift_distance_m: f64,
    pub drift_bearing_deg: f64,
    pub path_drift_ft: f64,
    pub displacement_east_m: f64,
    pub displacement_north_m: f64,
    pub descent_time_s: f64,
    pub skipped_bands: usize,
    pub ground_wind_speed_kt: f64,
    pub ground_wind_direction_deg: f64,
}

impl DriftSummary {
    /// `None` if the simulation holds no points.
    pub fn new(sim: &LaunchSimulation, outcome: &DriftOutcome) -> Option<Self> {
        let launch = sim.launch()?.location;
        let landing = sim.landing()?.location;
        Some(Self {
            hour: sim.hour,
            model: sim.model_name.clone(),
            launch,
            landing,
            apogee_ft: sim.apogee()?.altitude,
            drift_distance_m: great_circle_distance(&launch, &landing),
            drift_bearing_deg: initial_bearing(&launch, &landing),
            path_drift_ft: outcome.total_drift_ft,
            displacement_east_m: outcome.displacement.x,
            displacement_north_m: outcome.displacement.y,
            descent_time_s: outcome.descent_time,
            skipped_bands: outcome.skipped_bands,
            ground_wind_speed_kt: sim.ground_wind_speed,
            ground_wind_direction_deg: sim.ground_wind_direction,
        })
    }
}

/// Write summaries as a pretty-printed JSON array.
pub fn write_summaries<W: Write>(writer: &mut W, summaries: &[DriftSummary]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summaries)?;
    writeln!(writer)?;
    Ok(())
}
