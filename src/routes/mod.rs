pub mod admin;
pub mod auth;
pub mod bookings;
pub mod venues;

use axum::Router;
use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(venues::router())
        .merge(bookings::router())
        .merge(admin::router())
}
