use chrono::{DateTime, Duration, Utc};
use livadai_catalog::{ResolvedEnd, Schedule};
use serde::{Deserialize, Serialize};

/// A closed time range; `closes_at: None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub opens_at: DateTime<Utc>,
    pub closes_at: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn bounded(opens_at: DateTime<Utc>, closes_at: DateTime<Utc>) -> Self {
        Self { opens_at, closes_at: Some(closes_at) }
    }

    pub fn open_ended(opens_at: DateTime<Utc>) -> Self {
        Self { opens_at, closes_at: None }
    }

    /// Both bounds inclusive.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        now >= self.opens_at && self.closes_at.map_or(true, |closes_at| now <= closes_at)
    }

    pub fn has_closed(&self, now: DateTime<Utc>) -> bool {
        self.closes_at.is_some_and(|closes_at| now > closes_at)
    }
}

/// Offsets that shape every booking window.
///
/// `Default` carries the marketplace rules: disputes from 15 minutes to 72
/// hours after the end, attendance from 15 minutes after the start to 48 hours
/// after the end, reviews and completed history from 48 hours after the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    pub dispute_opens_after_end: Duration,
    pub dispute_closes_after_end: Duration,
    pub attendance_opens_after_start: Duration,
    pub attendance_closes_after_end: Duration,
    pub review_opens_after_end: Duration,
    pub history_delay_after_end: Duration,
    pub single_day_fallback: Duration,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            dispute_opens_after_end: Duration::minutes(15),
            dispute_closes_after_end: Duration::hours(72),
            attendance_opens_after_start: Duration::minutes(15),
            attendance_closes_after_end: Duration::hours(48),
            review_opens_after_end: Duration::hours(48),
            history_delay_after_end: Duration::hours(48),
            single_day_fallback: Duration::hours(24),
        }
    }
}

/// Every window derived from one schedule. Missing entries are unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWindows {
    pub effective_start: Option<DateTime<Utc>>,
    pub effective_end: Option<ResolvedEnd>,
    pub dispute: Option<TimeWindow>,
    pub attendance: Option<TimeWindow>,
    pub review: Option<TimeWindow>,
    pub history_visible_after: Option<DateTime<Utc>>,
}

impl WindowPolicy {
    pub fn effective_end(&self, schedule: &Schedule) -> Option<ResolvedEnd> {
        schedule.resolve_end(self.single_day_fallback)
    }

    fn end_plus(&self, schedule: &Schedule, offset: Duration) -> Option<DateTime<Utc>> {
        self.effective_end(schedule)
            .and_then(|end| end.at.checked_add_signed(offset))
    }

    pub fn dispute_window(&self, schedule: &Schedule) -> Option<TimeWindow> {
        let opens_at = self.end_plus(schedule, self.dispute_opens_after_end)?;
        let closes_at = self.end_plus(schedule, self.dispute_closes_after_end)?;
        Some(TimeWindow::bounded(opens_at, closes_at))
    }

    /// Needs both a start and an end.
    pub fn attendance_window(&self, schedule: &Schedule) -> Option<TimeWindow> {
        let opens_at = schedule
            .effective_start()?
            .checked_add_signed(self.attendance_opens_after_start)?;
        let closes_at = self.end_plus(schedule, self.attendance_closes_after_end)?;
        Some(TimeWindow::bounded(opens_at, closes_at))
    }

    pub fn review_window(&self, schedule: &Schedule) -> Option<TimeWindow> {
        self.end_plus(schedule, self.review_opens_after_end)
            .map(TimeWindow::open_ended)
    }

    /// Completed bookings join history strictly after this instant.
    pub fn history_visible_after(&self, schedule: &Schedule) -> Option<DateTime<Utc>> {
        self.end_plus(schedule, self.history_delay_after_end)
    }

    pub fn windows(&self, schedule: &Schedule) -> BookingWindows {
        BookingWindows {
            effective_start: schedule.effective_start(),
            effective_end: self.effective_end(schedule),
            dispute: self.dispute_window(schedule),
            attendance: self.attendance_window(schedule),
            review: self.review_window(schedule),
            history_visible_after: self.history_visible_after(schedule),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use livadai_catalog::EndSource;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn scheduled(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        minutes: Option<f64>,
    ) -> Schedule {
        Schedule { starts_at: start, ends_at: end, duration_minutes: minutes }
    }

    #[test]
    fn test_window_contains_is_closed() {
        let window = TimeWindow::bounded(utc(2024, 6, 1, 10, 0), utc(2024, 6, 1, 12, 0));
        assert!(!window.contains(utc(2024, 6, 1, 10, 0) - Duration::seconds(1)));
        assert!(window.contains(utc(2024, 6, 1, 10, 0)));
        assert!(window.contains(utc(2024, 6, 1, 12, 0)));
        assert!(!window.contains(utc(2024, 6, 1, 12, 0) + Duration::seconds(1)));
        assert!(window.has_closed(utc(2024, 6, 1, 12, 0) + Duration::seconds(1)));
    }

    #[test]
    fn test_open_ended_window() {
        let window = TimeWindow::open_ended(utc(2024, 6, 1, 10, 0));
        assert!(window.contains(utc(2099, 1, 1, 0, 0)));
        assert!(!window.has_closed(utc(2099, 1, 1, 0, 0)));
    }

    #[test]
    fn test_duration_scenario_windows() {
        let policy = WindowPolicy::default();
        let schedule = scheduled(Some(utc(2024, 6, 1, 10, 0)), None, Some(90.0));
        let windows = policy.windows(&schedule);

        let end = windows.effective_end.unwrap();
        assert_eq!(end.at, utc(2024, 6, 1, 11, 30));
        assert_eq!(end.source, EndSource::Duration);

        let attendance = windows.attendance.unwrap();
        assert_eq!(attendance.opens_at, utc(2024, 6, 1, 10, 15));
        assert_eq!(attendance.closes_at, Some(utc(2024, 6, 3, 11, 30)));

        let dispute = windows.dispute.unwrap();
        assert_eq!(dispute.opens_at, utc(2024, 6, 1, 11, 45));
        assert_eq!(dispute.closes_at, Some(utc(2024, 6, 4, 11, 30)));

        assert_eq!(windows.review.unwrap().opens_at, utc(2024, 6, 3, 11, 30));
        assert_eq!(windows.review.unwrap().closes_at, None);
        assert_eq!(windows.history_visible_after, Some(utc(2024, 6, 3, 11, 30)));
    }

    #[test]
    fn test_explicit_end_ignores_fallbacks() {
        let policy = WindowPolicy::default();
        let explicit = utc(2024, 6, 1, 18, 0);
        for minutes in [None, Some(90.0), Some(0.0)] {
            for start in [None, Some(utc(2024, 6, 1, 10, 0))] {
                let end = policy.effective_end(&scheduled(start, Some(explicit), minutes)).unwrap();
                assert_eq!(end.at, explicit);
                assert_eq!(end.source, EndSource::Explicit);
            }
        }
    }

    #[test]
    fn test_attendance_requires_start() {
        let policy = WindowPolicy::default();
        let schedule = scheduled(None, Some(utc(2024, 6, 1, 18, 0)), None);
        assert!(policy.attendance_window(&schedule).is_none());
        assert!(policy.dispute_window(&schedule).is_some());
    }

    #[test]
    fn test_no_schedule_no_windows() {
        let windows = WindowPolicy::default().windows(&Schedule::default());
        assert_eq!(windows.effective_end, None);
        assert_eq!(windows.dispute, None);
        assert_eq!(windows.attendance, None);
        assert_eq!(windows.review, None);
        assert_eq!(windows.history_visible_after, None);
    }

    #[test]
    fn test_custom_policy_offsets() {
        let policy = WindowPolicy {
            dispute_closes_after_end: Duration::hours(24),
            single_day_fallback: Duration::hours(2),
            ..WindowPolicy::default()
        };
        let schedule = scheduled(Some(utc(2024, 6, 1, 10, 0)), None, None);
        let dispute = policy.dispute_window(&schedule).unwrap();
        assert_eq!(dispute.opens_at, utc(2024, 6, 1, 12, 15));
        assert_eq!(dispute.closes_at, Some(utc(2024, 6, 2, 12, 0)));
    }
}
