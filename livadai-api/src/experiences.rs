use axum::{
    extract::{rejection::JsonRejection, Extension, Json, Query},
    routing::post,
    Router,
};
use livadai_booking::{
    group_by_experience, rollup_status, Booking, BookingStatus, ExperienceGroup, SeatCounting,
    SeatSummary,
};
use livadai_catalog::{participants_count, Availability, Experience};
use livadai_core::{Actor, Role};
use livadai_shared::{BookingRecord, ExperienceRecord};
use serde::{Deserialize, Serialize};

use crate::bookings::body;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CountingQuery {
    #[serde(default)]
    pub counting: SeatCounting,
}

#[derive(Debug, Deserialize)]
pub struct SeatsRequest {
    pub experience: Option<ExperienceRecord>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatsResponse {
    #[serde(flatten)]
    pub seats: SeatSummary,
    pub status: BookingStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[serde(flatten)]
    pub availability: Availability,
    pub participants_count: i64,
    pub duration_minutes: Option<i64>,
    pub bookable: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/experiences/seats", post(seats))
        .route("/v1/experiences/availability", post(availability))
        .route("/v1/host/dashboard", post(dashboard))
}

async fn seats(
    Query(query): Query<CountingQuery>,
    payload: Result<Json<SeatsRequest>, JsonRejection>,
) -> Result<Json<SeatsResponse>, AppError> {
    let req = body(payload)?;
    let bookings: Vec<Booking> = req.bookings.iter().map(Booking::from_record).collect();

    // Fall back to the snapshot embedded in the first booking.
    let experience = req
        .experience
        .as_ref()
        .map(Experience::from_record)
        .or_else(|| bookings.iter().find_map(|b| b.experience.clone()));

    Ok(Json(SeatsResponse {
        seats: SeatSummary::compute(experience.as_ref(), &bookings, query.counting),
        status: rollup_status(&bookings),
    }))
}

async fn availability(
    payload: Result<Json<ExperienceRecord>, JsonRejection>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let experience = Experience::from_record(&body(payload)?);
    let availability = Availability::of(&experience);

    Ok(Json(AvailabilityResponse {
        participants_count: participants_count(&experience),
        duration_minutes: experience.schedule.length_minutes(),
        bookable: availability.is_bookable(),
        availability,
    }))
}

async fn dashboard(
    Extension(actor): Extension<Actor>,
    Query(query): Query<CountingQuery>,
    payload: Result<Json<Vec<BookingRecord>>, JsonRejection>,
) -> Result<Json<Vec<ExperienceGroup>>, AppError> {
    if actor.role != Role::Host {
        return Err(AppError::AuthorizationError("Host role required".to_string()));
    }

    let bookings: Vec<Booking> = body(payload)?.iter().map(Booking::from_record).collect();
    Ok(Json(group_by_experience(bookings, query.counting)))
}
