use chrono::{DateTime, Duration, Utc};
use livadai_core::parse_instant;
use livadai_shared::ExperienceRecord;
use serde::{Deserialize, Serialize};

/// Fallback length of an experience that has a start but neither an end nor a duration.
pub const SINGLE_DAY_FALLBACK_HOURS: i64 = 24;

/// When an experience takes place, as far as the snapshot tells us.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<f64>,
}

/// Which rule produced the effective end instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndSource {
    Explicit,
    Duration,
    DayFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEnd {
    pub at: DateTime<Utc>,
    pub source: EndSource,
}

impl Schedule {
    pub fn from_record(record: &ExperienceRecord) -> Self {
        Self {
            starts_at: record.start_raw().and_then(parse_instant),
            ends_at: record.end_raw().and_then(parse_instant),
            duration_minutes: record.duration_minutes,
        }
    }

    /// Uses `start` when the snapshot carries no start of its own
    /// (legacy bookings keep it in their `date` field).
    pub fn with_fallback_start(mut self, start: Option<DateTime<Utc>>) -> Self {
        if self.starts_at.is_none() {
            self.starts_at = start;
        }
        self
    }

    pub fn effective_start(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }

    /// Effective end with the standard single-day fallback.
    pub fn effective_end(&self) -> Option<DateTime<Utc>> {
        self.resolve_end(Duration::hours(SINGLE_DAY_FALLBACK_HOURS))
            .map(|end| end.at)
    }

    /// Resolves the end instant in strict priority order: explicit end,
    /// start plus a positive duration, start plus `day_fallback`.
    pub fn resolve_end(&self, day_fallback: Duration) -> Option<ResolvedEnd> {
        if let Some(at) = self.ends_at {
            return Some(ResolvedEnd { at, source: EndSource::Explicit });
        }

        let start = self.starts_at?;

        if let Some(at) = self.duration().and_then(|d| start.checked_add_signed(d)) {
            return Some(ResolvedEnd { at, source: EndSource::Duration });
        }

        start
            .checked_add_signed(day_fallback)
            .map(|at| ResolvedEnd { at, source: EndSource::DayFallback })
    }

    /// Positive, finite duration only; zero or negative means "not given".
    fn duration(&self) -> Option<Duration> {
        let minutes = self.duration_minutes.filter(|m| m.is_finite() && *m > 0.0)?;
        Duration::try_milliseconds((minutes * 60_000.0).round() as i64)
    }

    /// Display length in minutes: the declared duration, else the span between
    /// explicit start and end, never negative.
    pub fn length_minutes(&self) -> Option<i64> {
        if let Some(minutes) = self.duration_minutes.filter(|m| m.is_finite() && *m > 0.0) {
            return Some(minutes.round() as i64);
        }
        let (start, end) = (self.starts_at?, self.ends_at?);
        let seconds = (end - start).num_seconds().max(0);
        Some((seconds as f64 / 60.0).round() as i64)
    }
}
