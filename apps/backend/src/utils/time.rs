//! Timestamp normalization.
//!
//! Every instant that reaches the store goes through [`utc_seconds`] so that
//! SQLite's text encoding compares in chronological order and values read
//! back equal the values written.

use time::{Duration, OffsetDateTime, UtcOffset};

use crate::errors::domain::{DomainError, ValidationKind};

/// Convert to UTC and drop sub-second precision.
///
/// An RFC 3339 value near the edge of the supported year range can parse
/// fine yet land outside it once shifted to UTC; that is a validation error.
pub fn utc_seconds(t: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let utc = t.checked_to_offset(UtcOffset::UTC).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidTimeWindow,
            "Timestamp is outside the supported range",
        )
    })?;
    Ok(drop_subseconds(utc))
}

/// Current wall-clock time, normalized.
pub fn now() -> OffsetDateTime {
    drop_subseconds(OffsetDateTime::now_utc())
}

fn drop_subseconds(t: OffsetDateTime) -> OffsetDateTime {
    t - Duration::nanoseconds(i64::from(t.nanosecond()))
}
