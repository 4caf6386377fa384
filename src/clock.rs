//! Time injection.
//!
//! Handlers that stamp payloads take a [`Clock`] instead of calling
//! `Utc::now()` directly, so their output is reproducible under test.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Render a timestamp the way the wire format expects it
/// (RFC 3339 with millisecond precision, e.g. `2026-08-06T12:00:00.000Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Clock pinned to a fixed instant.
#[cfg(test)]
pub(crate) struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 30, 45).unwrap();
        assert_eq!(format_timestamp(at), "2026-08-06T12:30:45.000Z");
    }
}
