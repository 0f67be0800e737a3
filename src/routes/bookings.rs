use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::booking;
use crate::error::AppError;
use crate::models::booking::{
    AvailabilityQuery, Booking, BookingConfirmation, BookingRequest, JoinConfirmation,
    JoinRequest, JoinableGame, SlotAvailability,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/venues/{id}/availability", get(availability))
        .route("/api/venues/{id}/bookings", post(create_bookings))
        .route("/api/bookings/mine", get(my_bookings))
        .route("/api/bookings/mine/open", get(my_open_bookings))
        .route("/api/games", get(joinable_games))
        .route("/api/games/{id}/join", post(join_game))
}

async fn availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<Vec<SlotAvailability>>, AppError> {
    let slots = booking::availability(&state.store, id, params.date).await?;
    Ok(Json(slots))
}

async fn create_bookings(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let today = Local::now().date_naive();
    let confirmation = booking::book_slots(&state.store, auth.as_ref(), id, &body, today).await?;
    Ok(Json(confirmation))
}

async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(booking::list_user_bookings(&state.store, &auth, false).await?))
}

async fn my_open_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(booking::list_user_bookings(&state.store, &auth, true).await?))
}

async fn joinable_games(State(state): State<AppState>) -> Result<Json<Vec<JoinableGame>>, AppError> {
    let now = Local::now().naive_local();
    Ok(Json(booking::list_joinable_games(&state.store, now).await?))
}

async fn join_game(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<JoinRequest>,
) -> Result<Json<JoinConfirmation>, AppError> {
    let now = Local::now().naive_local();
    let confirmation =
        booking::join_open_slots(&state.store, auth.as_ref(), id, body.count, now).await?;
    Ok(Json(confirmation))
}
