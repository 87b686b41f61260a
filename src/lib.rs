//! Wind profile fusion and descent drift prediction for rocket launches.
//!
//! Forecast JSON goes in through [`profile::Forecast`], comes out of
//! [`profile::fuse_hour`] as a ground-anchored [`profile::WindProfile`], and is
//! either written with [`io::write_profile`] or flown through
//! [`drift::project_descent`].

pub mod error;
pub mod units;
pub mod geo;
pub mod launch;
pub mod profile;
pub mod drift;
pub mod io;

pub use error::{Result, WindError};
pub use geo::GeoLocation;
pub use profile::{WindProfile, WindSample};
