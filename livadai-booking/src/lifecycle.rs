use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::Booking;
use crate::status::BookingStatus;
use crate::windows::WindowPolicy;

/// Requests that move a booking through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleAction {
    SettlePayment,
    SettleDeposit,
    /// Checkout never completed.
    Abandon,
    OpenAttendance,
    ConfirmAttendance,
    MarkNoShow,
    CancelByHost,
    AutoComplete,
    Dispute,
    /// `upheld` is true when the explorer's complaint is accepted.
    ResolveDispute { upheld: bool },
    Refund,
}

/// Computes the status a booking moves to. Never mutates anything; the
/// caller persists the result through the authorized API call.
pub fn next_status(
    current: &BookingStatus,
    action: LifecycleAction,
) -> Result<BookingStatus, TransitionError> {
    use BookingStatus as S;
    use LifecycleAction as A;

    if current.is_terminal() {
        return Err(TransitionError::Terminal(current.to_string()));
    }

    let next = match (current, action) {
        (S::Pending, A::SettlePayment) => S::Paid,
        (S::Pending, A::SettleDeposit) => S::DepositPaid,
        (S::Pending, A::Abandon) => S::Cancelled,
        (S::Paid | S::DepositPaid, A::OpenAttendance) => S::PendingAttendance,
        (s, A::ConfirmAttendance) if s.is_actionable() => S::Completed,
        (s, A::MarkNoShow) if s.is_actionable() => S::NoShow,
        (s, A::CancelByHost) if s.is_actionable() => S::Cancelled,
        (s, A::AutoComplete) if s.is_actionable() => S::AutoCompleted,
        (s, A::Dispute) if s.is_actionable() || s.is_completed() || *s == S::NoShow => S::Disputed,
        (S::Disputed, A::ResolveDispute { upheld: false }) => S::DisputeWon,
        (S::Disputed, A::ResolveDispute { upheld: true }) => S::DisputeLost,
        (S::Cancelled | S::DisputeLost, A::Refund) => S::Refunded,
        _ => {
            return Err(TransitionError::InvalidTransition {
                from: current.to_string(),
                action: format!("{:?}", action),
            })
        }
    };

    Ok(next)
}

/// The time-driven transition due for a booking, if any.
///
/// An actionable booking whose attendance window has closed without a host
/// decision is auto-completed; a paid booking whose experience has started
/// moves to pending attendance.
pub fn scheduled_transition(
    booking: &Booking,
    policy: &WindowPolicy,
    now: DateTime<Utc>,
) -> Option<LifecycleAction> {
    let schedule = booking.schedule();

    if auto_complete_due(booking, policy, now) {
        return Some(LifecycleAction::AutoComplete);
    }

    let started = schedule.effective_start().is_some_and(|start| now >= start);
    if matches!(booking.status, BookingStatus::Paid | BookingStatus::DepositPaid) && started {
        return Some(LifecycleAction::OpenAttendance);
    }

    None
}

/// Host's grace period elapsed: the attendance window closed while the
/// booking was still actionable.
pub fn auto_complete_due(booking: &Booking, policy: &WindowPolicy, now: DateTime<Utc>) -> bool {
    booking.status.is_actionable()
        && policy
            .attendance_window(&booking.schedule())
            .is_some_and(|window| window.has_closed(now))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid state transition from {from} via {action}")]
    InvalidTransition {
        from: String,
        action: String,
    },

    #[error("Booking is in terminal state {0}")]
    Terminal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use livadai_shared::BookingRecord;

    fn status(raw: &str) -> BookingStatus {
        BookingStatus::parse(raw)
    }

    fn booking(raw_status: &str) -> Booking {
        let record: BookingRecord = serde_json::from_str(&format!(
            r#"{{"_id":"b","status":"{raw_status}","experience":{{
                "startsAt":"2024-06-01T10:00:00Z","endsAt":"2024-06-01T12:00:00Z"}}}}"#
        ))
        .unwrap();
        Booking::from_record(&record)
    }

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_booking_lifecycle() {
        let mut current = BookingStatus::Pending;

        // Pending → Paid
        current = next_status(&current, LifecycleAction::SettlePayment).unwrap();
        assert_eq!(current, BookingStatus::Paid);

        // Paid → PendingAttendance
        current = next_status(&current, LifecycleAction::OpenAttendance).unwrap();
        assert_eq!(current, BookingStatus::PendingAttendance);

        // PendingAttendance → Completed
        current = next_status(&current, LifecycleAction::ConfirmAttendance).unwrap();
        assert_eq!(current, BookingStatus::Completed);

        // Completed → Disputed → DisputeLost → Refunded
        current = next_status(&current, LifecycleAction::Dispute).unwrap();
        current = next_status(&current, LifecycleAction::ResolveDispute { upheld: true }).unwrap();
        assert_eq!(current, BookingStatus::DisputeLost);
        current = next_status(&current, LifecycleAction::Refund).unwrap();
        assert_eq!(current, BookingStatus::Refunded);
    }

    #[test]
    fn test_host_actions_need_actionable_status() {
        for raw in ["PAID", "DEPOSIT_PAID", "PENDING_ATTENDANCE"] {
            let current = status(raw);
            assert_eq!(
                next_status(&current, LifecycleAction::MarkNoShow),
                Ok(BookingStatus::NoShow)
            );
            assert_eq!(
                next_status(&current, LifecycleAction::CancelByHost),
                Ok(BookingStatus::Cancelled)
            );
            assert_eq!(
                next_status(&current, LifecycleAction::AutoComplete),
                Ok(BookingStatus::AutoCompleted)
            );
        }
        for raw in ["PENDING", "COMPLETED", "NO_SHOW", "DISPUTED", "MYSTERY"] {
            let result = next_status(&status(raw), LifecycleAction::ConfirmAttendance);
            assert!(result.is_err(), "{raw}");
        }
    }

    #[test]
    fn test_dispute_sources() {
        for raw in ["PAID", "PENDING_ATTENDANCE", "COMPLETED", "AUTO_COMPLETED", "NO_SHOW"] {
            let result = next_status(&status(raw), LifecycleAction::Dispute);
            assert_eq!(result, Ok(BookingStatus::Disputed), "{raw}");
        }
        for raw in ["PENDING", "CANCELLED", "DISPUTED", "DISPUTE_LOST"] {
            assert!(next_status(&status(raw), LifecycleAction::Dispute).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_dispute_resolution() {
        let host_wins = LifecycleAction::ResolveDispute { upheld: false };
        assert_eq!(next_status(&BookingStatus::Disputed, host_wins), Ok(BookingStatus::DisputeWon));

        let explorer_wins = LifecycleAction::ResolveDispute { upheld: true };
        assert!(next_status(&BookingStatus::Paid, explorer_wins).is_err());
    }

    #[test]
    fn test_terminal_states() {
        for terminal in [BookingStatus::Refunded, BookingStatus::DisputeWon] {
            assert_eq!(
                next_status(&terminal, LifecycleAction::Dispute),
                Err(TransitionError::Terminal(terminal.to_string()))
            );
        }
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = next_status(&BookingStatus::Pending, LifecycleAction::Refund).unwrap_err();
        assert_eq!(err.to_string(), "Invalid state transition from PENDING via Refund");
    }

    #[test]
    fn test_auto_complete_after_grace_period() {
        let policy = WindowPolicy::default();
        let b = booking("PENDING_ATTENDANCE");
        assert!(!auto_complete_due(&b, &policy, end() + Duration::hours(48)));
        assert!(auto_complete_due(&b, &policy, end() + Duration::hours(48) + Duration::seconds(1)));
        assert!(!auto_complete_due(&booking("COMPLETED"), &policy, end() + Duration::days(10)));
    }

    #[test]
    fn test_scheduled_transition() {
        let policy = WindowPolicy::default();
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let before = start - Duration::minutes(1);
        assert_eq!(scheduled_transition(&booking("PAID"), &policy, before), None);
        assert_eq!(
            scheduled_transition(&booking("PAID"), &policy, start),
            Some(LifecycleAction::OpenAttendance)
        );
        assert_eq!(scheduled_transition(&booking("PENDING_ATTENDANCE"), &policy, start), None);
        assert_eq!(
            scheduled_transition(&booking("DEPOSIT_PAID"), &policy, end() + Duration::hours(49)),
            Some(LifecycleAction::AutoComplete)
        );
        let late = end() + Duration::hours(49);
        assert_eq!(scheduled_transition(&booking("PENDING"), &policy, late), None);
    }

    #[test]
    fn test_action_serde() {
        let action: LifecycleAction =
            serde_json::from_str(r#"{"type":"RESOLVE_DISPUTE","upheld":true}"#).unwrap();
        assert_eq!(action, LifecycleAction::ResolveDispute { upheld: true });
        assert_eq!(
            serde_json::to_string(&LifecycleAction::MarkNoShow).unwrap(),
            r#"{"type":"MARK_NO_SHOW"}"#
        );
    }
}
