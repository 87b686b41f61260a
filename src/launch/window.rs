use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, WindError};

/// Oldest forecast hour the reference provider serves, relative to now.
pub const MAX_PAST_HOURS: i64 = -216;
/// Furthest forecast hour the reference provider serves, relative to now.
pub const MAX_FUTURE_HOURS: i64 = 360;

// ---------------------------------------------------------------------------
// Launch time window
// ---------------------------------------------------------------------------

/// A same-day range of whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchTimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl LaunchTimeWindow {
    pub fn new(date: NaiveDate, start_hour: u32, end_hour: u32) -> Result<Self> {
        if end_hour < start_hour {
            return Err(WindError::HourOrder { start: start_hour, end: end_hour });
        }
        Ok(Self {
            start: at_hour(date, start_hour)?,
            end: at_hour(date, end_hour)?,
        })
    }

    /// Parse `YYYY-MM-DD` plus two hour strings (`"14"` or `"14:35"`; the
    /// minutes are dropped).
    pub fn parse(date: &str, start_hour: &str, end_hour: &str) -> Result<Self> {
        let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| WindError::InvalidDate(date.to_string()))?;
        Self::new(day, parse_hour(start_hour)?, parse_hour(end_hour)?)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Hours of day covered, inclusive.
    pub fn hours(&self) -> impl Iterator<Item = u32> {
        use chrono::Timelike;
        self.start.hour()..=self.end.hour()
    }

    /// Signed whole hours from `now` to the window start (truncated toward zero).
    pub fn start_offset_hours(&self, now: NaiveDateTime) -> i64 {
        (self.start - now).num_hours()
    }

    pub fn end_offset_hours(&self, now: NaiveDateTime) -> i64 {
        (self.end - now).num_hours()
    }

    /// Whether both ends fall inside the provider's forecast horizon.
    pub fn within_forecast_range(&self, now: NaiveDateTime) -> bool {
        let range = MAX_PAST_HOURS..=MAX_FUTURE_HOURS;
        range.contains(&self.start_offset_hours(now)) && range.contains(&self.end_offset_hours(now))
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> Result<NaiveDateTime> {
    NaiveTime::from_hms_opt(hour, 0, 0)
        .map(|t| date.and_time(t))
        .ok_or_else(|| WindError::InvalidHour(hour.to_string()))
}

/// Parse an hour-of-day, truncating any `:MM` suffix.
pub fn parse_hour(text: &str) -> Result<u32> {
    let head = text.trim().split(':').next().unwrap_or("");
    match head.parse::<u32>() {
        Ok(h) if h <= 23 => Ok(h),
        _ => Err(WindError::InvalidHour(text.to_string())),
    }
}
