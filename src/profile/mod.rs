pub mod sample;
pub mod wind_profile;
pub mod direction;
pub mod forecast;
pub mod fusion;

pub use sample::WindSample;
pub use wind_profile::{AltitudeReference, WindProfile};
pub use forecast::{Forecast, HEIGHT_LEVELS_M, PRESSURE_LEVELS_HPA};
pub use fusion::{fuse, fuse_hour, fuse_hours};
