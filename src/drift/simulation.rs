use serde::Serialize;

use crate::geo::{great_circle_distance, GeoLocation};
use crate::profile::WindProfile;
use super::descent::DriftOutcome;

/// One point of a rocket trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchPathPoint {
    pub altitude: f64, // ft AGL
    pub location: GeoLocation,
}

// ---------------------------------------------------------------------------
// Launch simulation (one forecast hour)
// ---------------------------------------------------------------------------

/// Trajectory plus the ground conditions it was computed under.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchSimulation {
    pub hour: usize,
    pub model_name: String,
    pub ground_elevation: f64,      // ft MSL
    pub ground_wind_speed: f64,     // kt
    pub ground_wind_direction: f64, // deg
    points: Vec<LaunchPathPoint>,
}

impl LaunchSimulation {
    /// Start an empty trajectory using `profile`'s ground conditions.
    pub fn new(hour: usize, profile: &WindProfile) -> Self {
        Self {
            hour,
            model_name: profile.source_model().to_string(),
            ground_elevation: profile.ground_elevation(),
            ground_wind_speed: profile.ground_wind_speed(),
            ground_wind_direction: profile.ground_wind_direction(),
            points: Vec::new(),
        }
    }

    /// Vertical ascent from `launch_site`, then the projected descent.
    pub fn from_descent(
        hour: usize,
        profile: &WindProfile,
        launch_site: GeoLocation,
        outcome: &DriftOutcome,
    ) -> Self {
        let mut sim = Self::new(hour, profile);
        sim.push(LaunchPathPoint { altitude: 0.0, location: launch_site });
        for point in &outcome.path {
            sim.push(*point);
        }
        sim
    }

    /// Append the next point in time order.
    pub fn push(&mut self, point: LaunchPathPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[LaunchPathPoint] {
        &self.points
    }

    /// Index of the highest point: the one right before altitude first
    /// drops. The first lower point only marks the turn, so apogee is read
    /// as the peak before it, not that point itself. A trajectory that never
    /// descends peaks at its last point.
    pub fn apogee_index(&self) -> Option<usize> {
        if self.points.is_empty() {
            return None;
        }
        let drop = self
            .points
            .windows(2)
            .position(|w| w[1].altitude < w[0].altitude);
        Some(drop.unwrap_or(self.points.len() - 1))
    }

    pub fn apogee(&self) -> Option<&LaunchPathPoint> {
        self.apogee_index().map(|i| &self.points[i])
    }

    pub fn launch(&self) -> Option<&LaunchPathPoint> {
        self.points.first()
    }

    pub fn landing(&self) -> Option<&LaunchPathPoint> {
        self.points.last()
    }

    /// Straight-line ground distance from launch to landing, m.
    pub fn drift_distance(&self) -> Option<f64> {
        Some(great_circle_distance(&self.launch()?.location, &self.landing()?.location))
    }
}
