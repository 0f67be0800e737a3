use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppError;
use crate::models::venue::{
    AssignHostRequest, CreateVenueRequest, UpdateVenueRequest, Venue, VenueListResponse,
};
use crate::routes::admin::resolve_user;
use crate::slots::{generate_slots, parse_hours};
use crate::AppState;

const VENUES_PER_PAGE: i64 = 9;
const CODE_LEN: usize = 30;
const CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/venues", get(list_venues).post(create_venue))
        .route("/api/venues/assigned", get(list_assigned))
        .route(
            "/api/venues/{id}",
            get(get_venue).patch(update_venue).delete(delete_venue),
        )
        .route("/api/venues/{id}/host", put(assign_host))
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

async fn generate_unique_code(pool: &PgPool) -> Result<String, AppError> {
    loop {
        let code = generate_code();
        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE code = $1)")
            .bind(&code)
            .fetch_one(pool)
            .await?;
        if !taken {
            return Ok(code);
        }
    }
}

/// Opening hours must parse and leave room for at least one slot.
pub fn validate_hours(opening: &str, closing: &str) -> Result<(), AppError> {
    let (open, close) = parse_hours(opening, closing)?;
    if generate_slots(open, close).next().is_none() {
        return Err(AppError::BadRequest(
            "Closing time must be at least one hour after opening time".into(),
        ));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value.to_string())
}

async fn fetch_venue(pool: &PgPool, id: Uuid) -> Result<Venue, AppError> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".into()))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    cursor: Option<DateTime<Utc>>,
}

async fn list_venues(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<VenueListResponse>, AppError> {
    let mut items = sqlx::query_as::<_, Venue>(
        "SELECT * FROM venues
         WHERE ($1::timestamptz IS NULL OR created_at < $1)
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(params.cursor)
    .bind(VENUES_PER_PAGE + 1)
    .fetch_all(&state.db)
    .await?;

    let has_more = items.len() as i64 > VENUES_PER_PAGE;
    items.truncate(VENUES_PER_PAGE as usize);
    let next_cursor = if has_more {
        items.last().map(|v| v.created_at)
    } else {
        None
    };

    Ok(Json(VenueListResponse { items, next_cursor }))
}

async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Venue>, AppError> {
    Ok(Json(fetch_venue(&state.db, id).await?))
}

async fn list_assigned(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Venue>>, AppError> {
    let venues = sqlx::query_as::<_, Venue>(
        "SELECT * FROM venues WHERE assigned_host = $1 ORDER BY created_at DESC",
    )
    .bind(auth.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(venues))
}

async fn create_venue(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateVenueRequest>,
) -> Result<Json<Venue>, AppError> {
    auth.require_admin()?;

    let title = require_text("Title", &body.title)?;
    let image_url = require_text("Image URL", &body.image_url)?;
    let kind = require_text("Type", &body.kind)?;
    validate_hours(&body.opening_time, &body.closing_time)?;

    let code = generate_unique_code(&state.db).await?;

    let venue = sqlx::query_as::<_, Venue>(
        "INSERT INTO venues (code, title, image_url, kind, opening_time, closing_time, owner_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(&code)
    .bind(&title)
    .bind(&image_url)
    .bind(&kind)
    .bind(body.opening_time.trim())
    .bind(body.closing_time.trim())
    .bind(auth.user_id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(venue_id = %venue.id, %code, "created venue");
    Ok(Json(venue))
}

async fn update_venue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVenueRequest>,
) -> Result<Json<Venue>, AppError> {
    let current = fetch_venue(&state.db, id).await?;
    if !auth.is_admin() && current.owner_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the owner or an admin can edit this venue".into(),
        ));
    }

    let title = match &body.title {
        Some(t) => require_text("Title", t)?,
        None => current.title,
    };
    let image_url = match &body.image_url {
        Some(u) => require_text("Image URL", u)?,
        None => current.image_url,
    };
    let kind = match &body.kind {
        Some(k) => require_text("Type", k)?,
        None => current.kind,
    };
    let opening_time = body
        .opening_time
        .as_deref()
        .map(str::trim)
        .unwrap_or(&current.opening_time)
        .to_string();
    let closing_time = body
        .closing_time
        .as_deref()
        .map(str::trim)
        .unwrap_or(&current.closing_time)
        .to_string();
    validate_hours(&opening_time, &closing_time)?;

    let venue = sqlx::query_as::<_, Venue>(
        "UPDATE venues
         SET title = $2, image_url = $3, kind = $4, opening_time = $5, closing_time = $6,
             updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&title)
    .bind(&image_url)
    .bind(&kind)
    .bind(&opening_time)
    .bind(&closing_time)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(venue))
}

async fn delete_venue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let result = sqlx::query("DELETE FROM venues WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Venue not found".into()));
    }

    tracing::info!(venue_id = %id, "deleted venue");
    Ok(StatusCode::NO_CONTENT)
}

async fn assign_host(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignHostRequest>,
) -> Result<Json<Venue>, AppError> {
    auth.require_admin()?;

    let host_id = resolve_user(&state.db, &body.host).await?;

    let venue = sqlx::query_as::<_, Venue>(
        "UPDATE venues SET assigned_host = $2, updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(host_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Venue not found".into()))?;

    tracing::info!(venue_id = %id, %host_id, "assigned venue host");
    Ok(Json(venue))
}
