//! Booking lifecycle and time-windowed eligibility rules.
//!
//! Everything here is a pure function of a booking snapshot and an explicit
//! `now`; nothing mutates bookings or reads the clock.

pub mod status;
pub mod models;
pub mod windows;
pub mod seats;
pub mod eligibility;
pub mod lifecycle;
pub mod timeline;

pub use status::BookingStatus;
pub use models::Booking;
pub use windows::{BookingWindows, TimeWindow, WindowPolicy};
pub use seats::{booked_seats, rollup_status, SeatCounting, SeatSummary};
pub use eligibility::{Action, Eligibility, EligibilityEvaluator};
pub use lifecycle::{
    auto_complete_due, next_status, scheduled_transition, LifecycleAction, TransitionError,
};
pub use timeline::{group_by_experience, is_history, ExperienceGroup, Timeline};
