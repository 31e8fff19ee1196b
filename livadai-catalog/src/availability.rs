use serde::{Deserialize, Serialize};
use crate::experience::{ActivityType, Experience, ExperienceStatus};

/// What an explorer sees on a listing card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Active,
    SoldOut,
    Paused,
    Cancelled,
}

/// Seat availability derived from an experience snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub spots_left: Option<i64>,
    pub occupied_seats: i64,
    pub participants: i64,
    pub sold_out: bool,
    pub listing_status: ListingStatus,
    pub max_bookable_quantity: u32,
}

impl Availability {
    pub fn of(experience: &Experience) -> Self {
        let spots_left = experience
            .available_spots
            .or(experience.remaining_spots)
            .or(experience.max_participants);

        let max = experience.max_participants.unwrap_or(0);

        let sold_out = experience.sold_out
            || (experience.is_group() && max > 1 && spots_left.unwrap_or(0) <= 0);

        let occupied_seats = if experience.is_group() && max > 0 {
            (max - spots_left.unwrap_or(0)).max(0)
        } else {
            0
        };

        let listing_status = if experience.status == ExperienceStatus::Cancelled
            || experience.is_active == Some(false)
        {
            ListingStatus::Cancelled
        } else if experience.status == ExperienceStatus::Disabled {
            ListingStatus::Paused
        } else if sold_out {
            ListingStatus::SoldOut
        } else {
            ListingStatus::Active
        };

        let max_bookable_quantity = match experience.activity_type {
            Some(ActivityType::Group) => spots_left
                .unwrap_or(1)
                .clamp(0, i64::from(u32::MAX)) as u32,
            _ => 1,
        };

        Self {
            spots_left,
            occupied_seats,
            participants: participants_count(experience),
            sold_out,
            listing_status,
            max_bookable_quantity,
        }
    }

    pub fn is_bookable(&self) -> bool {
        self.listing_status == ListingStatus::Active && self.max_bookable_quantity > 0
    }

    /// Validates a requested seat count before checkout.
    pub fn check_quantity(&self, requested: u32) -> Result<(), AvailabilityError> {
        if requested == 0 {
            return Err(AvailabilityError::InvalidQuantity(requested));
        }

        if !self.is_bookable() {
            return Err(AvailabilityError::Unavailable(self.listing_status));
        }

        if requested > self.max_bookable_quantity {
            return Err(AvailabilityError::InsufficientSpots {
                requested,
                available: self.max_bookable_quantity,
            });
        }

        Ok(())
    }
}

/// Participants of an already hosted experience: the server's own count when
/// present, otherwise capacity minus what is still free.
pub fn participants_count(experience: &Experience) -> i64 {
    if let Some(booked) = experience.booked_spots {
        return booked;
    }
    match (experience.max_participants, experience.available_spots) {
        (Some(max), Some(available)) => (max - available).max(0),
        _ => 0,
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Experience not bookable: {0:?}")]
    Unavailable(ListingStatus),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Insufficient spots: requested {requested}, available {available}")]
    InsufficientSpots {
        requested: u32,
        available: u32,
    },
}
