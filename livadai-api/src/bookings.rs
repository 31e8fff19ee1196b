use axum::{
    extract::{rejection::JsonRejection, Extension, Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use livadai_booking::{
    next_status, scheduled_transition, Action, Booking, BookingStatus, BookingWindows, Eligibility,
    LifecycleAction, Timeline,
};
use livadai_core::Actor;
use livadai_shared::BookingRecord;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: Action,
    pub booking: BookingRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub booking_id: String,
    #[serde(flatten)]
    pub eligibility: Eligibility,
    pub actions: Vec<Action>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub booking_id: String,
    pub from: BookingStatus,
    pub to: BookingStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsResponse {
    pub booking_id: String,
    #[serde(flatten)]
    pub windows: BookingWindows,
    pub scheduled_transition: Option<LifecycleAction>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub upcoming: Vec<String>,
    pub history: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings/eligibility", post(eligibility))
        .route("/v1/bookings/authorize", post(authorize))
        .route("/v1/bookings/transition", post(transition))
        .route("/v1/bookings/windows", post(windows))
        .route("/v1/bookings/timeline", post(timeline))
}

pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::ValidationError(rejection.body_text()))
}

async fn eligibility(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<BookingRecord>, JsonRejection>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let booking = Booking::from_record(&body(payload)?);
    let eligibility = state.evaluator.evaluate(&booking, &actor, state.clock.now());

    Ok(Json(EligibilityResponse {
        booking_id: booking.id,
        actions: eligibility.permitted(),
        eligibility,
    }))
}

/// Gate for a single action. 204 when allowed, 403 otherwise.
async fn authorize(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = body(payload)?;
    let booking = Booking::from_record(&req.booking);
    ensure_permitted(&state, &actor, &booking, req.action)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn transition(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<Json<TransitionResponse>, AppError> {
    let req = body(payload)?;
    let booking = Booking::from_record(&req.booking);

    let lifecycle = req.action.transition().ok_or_else(|| {
        AppError::ValidationError(format!("{:?} does not change booking status", req.action))
    })?;

    ensure_permitted(&state, &actor, &booking, req.action)?;

    let to = next_status(&booking.status, lifecycle)
        .map_err(|e| AppError::ConflictError(e.to_string()))?;

    info!(
        booking_id = %booking.id,
        actor_id = %actor.id,
        from = %booking.status,
        to = %to,
        "booking transition accepted"
    );

    Ok(Json(TransitionResponse {
        booking_id: booking.id,
        from: booking.status,
        to,
    }))
}

async fn windows(
    State(state): State<AppState>,
    Extension(_actor): Extension<Actor>,
    payload: Result<Json<BookingRecord>, JsonRejection>,
) -> Result<Json<WindowsResponse>, AppError> {
    let booking = Booking::from_record(&body(payload)?);
    let policy = state.evaluator.policy();

    Ok(Json(WindowsResponse {
        windows: policy.windows(&booking.schedule()),
        scheduled_transition: scheduled_transition(&booking, policy, state.clock.now()),
        booking_id: booking.id,
    }))
}

async fn timeline(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<Vec<BookingRecord>>, JsonRejection>,
) -> Result<Json<TimelineResponse>, AppError> {
    let bookings: Vec<Booking> = body(payload)?.iter().map(Booking::from_record).collect();
    let timeline =
        Timeline::partition(bookings, &actor, state.evaluator.policy(), state.clock.now());

    let ids = |list: Vec<Booking>| -> Vec<String> { list.into_iter().map(|b| b.id).collect() };
    Ok(Json(TimelineResponse {
        upcoming: ids(timeline.upcoming),
        history: ids(timeline.history),
    }))
}

fn ensure_permitted(
    state: &AppState,
    actor: &Actor,
    booking: &Booking,
    action: Action,
) -> Result<(), AppError> {
    let eligibility = state.evaluator.evaluate(booking, actor, state.clock.now());
    if eligibility.permits(action) {
        return Ok(());
    }

    warn!(
        booking_id = %booking.id,
        actor_id = %actor.id,
        status = %booking.status,
        ?action,
        "action rejected"
    );
    Err(AppError::AuthorizationError(format!(
        "{:?} is not permitted on booking {}",
        action, booking.id
    )))
}
