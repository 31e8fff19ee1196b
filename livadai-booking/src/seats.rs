use livadai_catalog::Experience;
use serde::{Deserialize, Serialize};
use crate::models::Booking;
use crate::status::BookingStatus;

/// Which bookings occupy seats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatCounting {
    /// Every booking handed in, whatever its status.
    #[default]
    All,
    /// Drops cancelled and refunded bookings first.
    ExcludeReleased,
}

impl SeatCounting {
    fn counts(&self, booking: &Booking) -> bool {
        match self {
            SeatCounting::All => true,
            SeatCounting::ExcludeReleased => !booking.status.is_released(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatSummary {
    pub booked_seats: u32,
    pub total_seats: u32,
    pub remaining_seats: u32,
}

impl SeatSummary {
    /// Total seats come from the experience capacity, else from remaining spots
    /// plus what is booked, else the booked seats themselves (capacity unknown).
    pub fn compute(
        experience: Option<&Experience>,
        bookings: &[Booking],
        counting: SeatCounting,
    ) -> Self {
        let booked_seats = booked_seats(bookings, counting);

        let total_seats = experience
            .and_then(Experience::capacity)
            .or_else(|| {
                experience.and_then(|exp| exp.remaining_spots).map(|remaining| {
                    let total = remaining.saturating_add(i64::from(booked_seats)).max(0);
                    u32::try_from(total).unwrap_or(u32::MAX)
                })
            })
            .unwrap_or(booked_seats);

        Self {
            booked_seats,
            total_seats,
            remaining_seats: total_seats.saturating_sub(booked_seats),
        }
    }
}

pub fn booked_seats(bookings: &[Booking], counting: SeatCounting) -> u32 {
    bookings
        .iter()
        .filter(|b| counting.counts(b))
        .fold(0u32, |sum, b| sum.saturating_add(b.quantity))
}

/// Status shown for an experience on the host dashboard.
///
/// Fixed priority, first match wins: disputed family, pending attendance,
/// paid, no-show, completed, otherwise pending.
pub fn rollup_status(bookings: &[Booking]) -> BookingStatus {
    let any = |pred: fn(&BookingStatus) -> bool| bookings.iter().any(|b| pred(&b.status));

    if any(BookingStatus::is_disputed) {
        BookingStatus::Disputed
    } else if any(|s| *s == BookingStatus::PendingAttendance) {
        BookingStatus::PendingAttendance
    } else if any(|s| matches!(s, BookingStatus::Paid | BookingStatus::DepositPaid)) {
        BookingStatus::Paid
    } else if any(|s| *s == BookingStatus::NoShow) {
        BookingStatus::NoShow
    } else if any(BookingStatus::is_completed) {
        BookingStatus::Completed
    } else {
        BookingStatus::Pending
    }
}
