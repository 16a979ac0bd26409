use chrono::{DateTime, NaiveDateTime};

use crate::error::{DashboardError, DashboardResult};

/// Maps a sheet timestamp onto the x axis (Unix milliseconds).
///
/// Sheet timestamps carry no zone; they are placed on the axis as UTC.
#[must_use]
pub fn instant_to_unix_millis(instant: NaiveDateTime) -> f64 {
    instant.and_utc().timestamp_millis() as f64
}

pub fn unix_millis_to_instant(millis: f64) -> DashboardResult<NaiveDateTime> {
    if !millis.is_finite() || millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return Err(DashboardError::InvalidData(
            "axis time must be finite and within i64 milliseconds".to_owned(),
        ));
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| DashboardError::InvalidData("axis time out of calendar range".to_owned()))
}
