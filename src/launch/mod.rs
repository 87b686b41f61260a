pub mod window;

pub use window::{parse_hour, LaunchTimeWindow, MAX_FUTURE_HOURS, MAX_PAST_HOURS};
