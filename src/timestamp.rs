//! Conversions between wall-clock timestamps and SenML time values
//!
//! SenML time is a floating point number of seconds since the Unix epoch.
//! Values at or below [`MAX_RELATIVE_TIME`] are relative to "now" (or to a
//! reference time chosen by the receiver), larger values are absolute.

use time::{Duration, OffsetDateTime};

use crate::{Result, SenMLError};

/// Largest time value (2^28 seconds) still interpreted as relative
pub const MAX_RELATIVE_TIME: f64 = 268_435_456.0;

const NANOS_PER_SECOND: f64 = 1e9;

/// Convert a timestamp to SenML time, keeping sub-second precision.
pub fn to_senml_time(t: OffsetDateTime) -> f64 {
    t.unix_timestamp_nanos() as f64 / NANOS_PER_SECOND
}

/// Convert a SenML time back to a timestamp.
///
/// Whole seconds and nanoseconds are computed separately, so the result is
/// exact up to the precision of an `f64` holding `f`.
pub fn from_senml_time(f: f64) -> Result<OffsetDateTime> {
    if !f.is_finite() {
        return Err(SenMLError::time(format!("{f} is not a finite time value")));
    }
    let secs = f.trunc();
    let nanos = f * NANOS_PER_SECOND - secs * NANOS_PER_SECOND;

    OffsetDateTime::from_unix_timestamp(secs as i64)?
        .checked_add(Duration::nanoseconds(nanos as i64))
        .ok_or_else(|| SenMLError::time(format!("{f} is out of range")))
}

/// Anchor a relative time on `reference`; absolute times pass through.
pub fn resolve_relative_time(t: f64, reference: f64) -> f64 {
    if t <= MAX_RELATIVE_TIME {
        t + reference
    } else {
        t
    }
}
