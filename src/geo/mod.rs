pub mod location;
pub mod geodesy;

pub use location::GeoLocation;
pub use geodesy::{great_circle_distance, initial_bearing, project_along_bearing, EARTH_RADIUS};
