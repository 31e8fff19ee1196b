use chrono::{DateTime, Utc};
use livadai_core::Actor;
use serde::{Deserialize, Serialize};
use crate::lifecycle::LifecycleAction;
use crate::models::Booking;
use crate::status::BookingStatus;
use crate::windows::WindowPolicy;

/// Actions a client may offer on a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    ConfirmAttendance,
    CancelByHost,
    MarkNoShow,
    Dispute,
    Review,
    Chat,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::ConfirmAttendance,
        Action::CancelByHost,
        Action::MarkNoShow,
        Action::Dispute,
        Action::Review,
        Action::Chat,
    ];

    /// The status change this action requests, if it changes status at all.
    pub fn transition(&self) -> Option<LifecycleAction> {
        match self {
            Action::ConfirmAttendance => Some(LifecycleAction::ConfirmAttendance),
            Action::CancelByHost => Some(LifecycleAction::CancelByHost),
            Action::MarkNoShow => Some(LifecycleAction::MarkNoShow),
            Action::Dispute => Some(LifecycleAction::Dispute),
            Action::Review | Action::Chat => None,
        }
    }
}

/// What the actor may do with a booking right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub can_dispute: bool,
    pub can_confirm_attendance: bool,
    pub can_cancel_by_host: bool,
    pub can_mark_no_show: bool,
    pub can_review: bool,
    pub can_chat: bool,
}

impl Eligibility {
    pub fn permits(&self, action: Action) -> bool {
        match action {
            Action::ConfirmAttendance => self.can_confirm_attendance,
            Action::CancelByHost => self.can_cancel_by_host,
            Action::MarkNoShow => self.can_mark_no_show,
            Action::Dispute => self.can_dispute,
            Action::Review => self.can_review,
            Action::Chat => self.can_chat,
        }
    }

    pub fn permitted(&self) -> Vec<Action> {
        Action::ALL.into_iter().filter(|a| self.permits(*a)).collect()
    }
}

/// Pure predicates gating booking actions.
///
/// Every method takes `now` explicitly; verdicts must not be cached across a
/// window boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEvaluator {
    policy: WindowPolicy,
}

impl EligibilityEvaluator {
    pub fn new(policy: WindowPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &WindowPolicy {
        &self.policy
    }

    pub fn evaluate(&self, booking: &Booking, actor: &Actor, now: DateTime<Utc>) -> Eligibility {
        let attendance = self.can_handle_attendance(booking, actor, now);
        let eligibility = Eligibility {
            can_dispute: self.can_dispute(booking, actor, now),
            can_confirm_attendance: attendance,
            can_cancel_by_host: self.can_cancel_by_host(booking, actor),
            can_mark_no_show: attendance,
            can_review: self.can_review(booking, now),
            can_chat: self.can_chat(booking),
        };

        tracing::trace!(
            booking_id = %booking.id,
            actor_id = %actor.id,
            role = %actor.role,
            status = %booking.status,
            ?eligibility,
            "evaluated booking eligibility"
        );

        eligibility
    }

    pub fn can_chat(&self, booking: &Booking) -> bool {
        booking.status.allows_chat()
    }

    pub fn can_dispute(&self, booking: &Booking, actor: &Actor, now: DateTime<Utc>) -> bool {
        if !actor.is_explorer_of(booking.explorer_id.as_deref()) {
            return false;
        }
        if booking.status.is_unknown()
            || matches!(booking.status, BookingStatus::Disputed | BookingStatus::Cancelled)
        {
            return false;
        }
        self.policy
            .dispute_window(&booking.schedule())
            .is_some_and(|window| window.contains(now))
    }

    /// Shared gate for confirming attendance and marking a no-show.
    pub fn can_handle_attendance(
        &self,
        booking: &Booking,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> bool {
        if !actor.is_host_of(booking.host_id.as_deref()) || !booking.status.is_actionable() {
            return false;
        }
        self.policy
            .attendance_window(&booking.schedule())
            .is_some_and(|window| window.contains(now))
    }

    pub fn can_confirm_attendance(
        &self,
        booking: &Booking,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> bool {
        self.can_handle_attendance(booking, actor, now)
    }

    pub fn can_mark_no_show(&self, booking: &Booking, actor: &Actor, now: DateTime<Utc>) -> bool {
        self.can_handle_attendance(booking, actor, now)
    }

    /// No time restriction: the host may cancel until the booking resolves.
    pub fn can_cancel_by_host(&self, booking: &Booking, actor: &Actor) -> bool {
        actor.is_host_of(booking.host_id.as_deref()) && booking.status.is_actionable()
    }

    pub fn can_review(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        booking.status.is_completed()
            && self
                .policy
                .review_window(&booking.schedule())
                .is_some_and(|window| window.contains(now))
    }
}
