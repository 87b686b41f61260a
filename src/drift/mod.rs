pub mod band;
pub mod descent;
pub mod simulation;

pub use band::{average_wind_direction, average_wind_speed, locate_band, wind_at, Band};
pub use descent::{
    descent_bands, drift_step, project_descent, DescentData, DescentProfile, DriftOutcome,
};
pub use simulation::{LaunchPathPoint, LaunchSimulation};
