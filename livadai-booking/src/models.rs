use chrono::{DateTime, Utc};
use livadai_catalog::{Experience, Schedule};
use livadai_core::parse_instant;
use livadai_shared::BookingRecord;
use serde::{Deserialize, Serialize};
use crate::status::BookingStatus;

/// One explorer's reservation against one experience.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub status: BookingStatus,
    pub quantity: u32,
    pub explorer_id: Option<String>,
    pub host_id: Option<String>,
    pub experience_id: Option<String>,
    pub experience: Option<Experience>,
    /// Legacy reference instant some older bookings carry instead of a schedule.
    pub date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn from_record(record: &BookingRecord) -> Self {
        Self {
            id: record.id.clone(),
            status: BookingStatus::parse(record.status.as_deref().unwrap_or_default()),
            quantity: record
                .quantity
                .filter(|q| *q > 0)
                .and_then(|q| u32::try_from(q).ok())
                .unwrap_or(1),
            explorer_id: record.explorer_id().map(str::to_string),
            host_id: record.host_id().map(str::to_string),
            experience_id: record.experience_id().map(str::to_string),
            experience: record.experience_record().map(Experience::from_record),
            date: record.date.as_deref().and_then(parse_instant),
            created_at: record.created_at.as_deref().and_then(parse_instant),
        }
    }

    /// The experience schedule, with the legacy `date` standing in for a missing start.
    pub fn schedule(&self) -> Schedule {
        self.experience
            .as_ref()
            .map(|exp| exp.schedule.clone())
            .unwrap_or_default()
            .with_fallback_start(self.date)
    }
}

impl From<&BookingRecord> for Booking {
    fn from(record: &BookingRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(json: &str) -> Booking {
        let record: BookingRecord = serde_json::from_str(json).unwrap();
        Booking::from_record(&record)
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        assert_eq!(booking(r#"{"_id":"b"}"#).quantity, 1);
        assert_eq!(booking(r#"{"_id":"b","quantity":0}"#).quantity, 1);
        assert_eq!(booking(r#"{"_id":"b","quantity":-2}"#).quantity, 1);
        assert_eq!(booking(r#"{"_id":"b","quantity":3}"#).quantity, 3);
    }

    #[test]
    fn test_from_record_maps_parties() {
        let b = booking(
            r#"{"_id":"b-1","status":"PAID","explorer":"x-1",
                "experience":{"_id":"e-1","host":{"_id":"h-1"},
                "startsAt":"2024-06-01T10:00:00Z"}}"#,
        );
        assert_eq!(b.status, BookingStatus::Paid);
        assert_eq!(b.explorer_id.as_deref(), Some("x-1"));
        assert_eq!(b.host_id.as_deref(), Some("h-1"));
        assert_eq!(b.experience_id.as_deref(), Some("e-1"));
        assert!(b.experience.is_some());
    }

    #[test]
    fn test_legacy_date_fills_missing_start() {
        let b = booking(r#"{"_id":"b","date":"2024-06-01T09:00:00Z","experience":"e-1"}"#);
        let schedule = b.schedule();
        assert_eq!(
            schedule.effective_start(),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap())
        );
        assert_eq!(
            schedule.effective_end(),
            Some(Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_null_status_is_unknown() {
        let b = booking(r#"{"_id":"b","status":null,"explorer":"x-1"}"#);
        assert!(b.status.is_unknown());
        assert_eq!(b.explorer_id.as_deref(), Some("x-1"));

        let numeric = booking(r#"{"_id":"b","status":3}"#);
        assert!(numeric.status.is_unknown());
    }

    #[test]
    fn test_string_duration_still_ends_the_experience() {
        let b = booking(
            r#"{"_id":"b","experience":{"_id":"e","startsAt":"2024-06-01T10:00:00Z",
                "durationMinutes":"90"}}"#,
        );
        assert_eq!(
            b.schedule().effective_end(),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 11, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_no_dates_means_no_schedule() {
        let b = booking(r#"{"_id":"b","date":"whenever"}"#);
        assert!(b.schedule().effective_end().is_none());
    }
}
