use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppError;
use crate::models::host_request::{
    CreateHostRequest, Decision, DecisionRequest, HostRequest, RequestStatus,
};
use crate::models::user::{User, UserLookup, UserResponse, UserRole};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/host-requests",
            post(create_host_request).get(list_host_requests),
        )
        .route("/api/host-requests/mine", get(my_host_requests))
        .route("/api/host-requests/{id}/decision", post(decide_host_request))
        .route("/api/admin/make-host", post(make_host))
}

/// Finds a user by id or, failing that, by email.
pub async fn resolve_user(pool: &PgPool, lookup: &UserLookup) -> Result<Uuid, AppError> {
    let found: Option<Uuid> = match (lookup.user_id, lookup.email.as_deref()) {
        (Some(id), _) => {
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
        (None, Some(email)) => {
            sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
                .bind(email.trim().to_lowercase())
                .fetch_optional(pool)
                .await?
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "Please provide either email or user ID".into(),
            ));
        }
    };

    found.ok_or_else(|| AppError::NotFound("User not found".into()))
}

async fn set_role(pool: &PgPool, user_id: Uuid, role: UserRole) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET role = $2, updated_at = now()
         WHERE id = $1
         RETURNING id, email, password_hash, role, created_at, updated_at",
    )
    .bind(user_id)
    .bind(role)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    tracing::info!(%user_id, ?role, "changed user role");
    Ok(user)
}

fn validate_host_request(body: &CreateHostRequest) -> Result<(), AppError> {
    let required = [
        ("Full name", &body.full_name),
        ("Phone number", &body.phone_number),
        ("Email", &body.email),
        ("Business name", &body.business_name),
        ("Business type", &body.business_type),
        ("Business location", &body.business_location),
        ("Opening time", &body.opening_time),
        ("Closing time", &body.closing_time),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }
    Ok(())
}

async fn create_host_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateHostRequest>,
) -> Result<Json<HostRequest>, AppError> {
    validate_host_request(&body)?;

    let request = sqlx::query_as::<_, HostRequest>(
        "INSERT INTO host_requests
            (user_id, full_name, phone_number, email, business_name, business_type,
             business_location, business_image_url, opening_time, closing_time, comments)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(auth.user_id)
    .bind(body.full_name.trim())
    .bind(body.phone_number.trim())
    .bind(body.email.trim())
    .bind(body.business_name.trim())
    .bind(body.business_type.trim())
    .bind(body.business_location.trim())
    .bind(&body.business_image_url)
    .bind(body.opening_time.trim())
    .bind(body.closing_time.trim())
    .bind(&body.comments)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(request_id = %request.id, user_id = %auth.user_id, "host request submitted");
    Ok(Json(request))
}

async fn my_host_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<HostRequest>>, AppError> {
    let requests = sqlx::query_as::<_, HostRequest>(
        "SELECT * FROM host_requests WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(requests))
}

async fn list_host_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<HostRequest>>, AppError> {
    auth.require_admin()?;

    let requests =
        sqlx::query_as::<_, HostRequest>("SELECT * FROM host_requests ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(requests))
}

async fn decide_host_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DecisionRequest>,
) -> Result<Json<HostRequest>, AppError> {
    auth.require_admin()?;

    let request = sqlx::query_as::<_, HostRequest>(
        "UPDATE host_requests SET status = $2, admin_message = $3, updated_at = now()
         WHERE id = $1 AND status = $4
         RETURNING *",
    )
    .bind(id)
    .bind(RequestStatus::from(body.action))
    .bind(&body.message)
    .bind(RequestStatus::Pending)
    .fetch_optional(&state.db)
    .await?;

    let request = match request {
        Some(r) => r,
        None => {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM host_requests WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&state.db)
                    .await?;
            return Err(if exists {
                AppError::Conflict("Request has already been decided".into())
            } else {
                AppError::NotFound("Request not found".into())
            });
        }
    };

    if body.action == Decision::Approve {
        set_role(&state.db, request.user_id, UserRole::Host).await?;
    }

    Ok(Json(request))
}

async fn make_host(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UserLookup>,
) -> Result<Json<UserResponse>, AppError> {
    auth.require_admin()?;

    let user_id = resolve_user(&state.db, &body).await?;
    let user = set_role(&state.db, user_id, UserRole::Host).await?;
    Ok(Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateHostRequest {
        CreateHostRequest {
            full_name: "Sam Reyes".into(),
            phone_number: "555-0100".into(),
            email: "sam@example.com".into(),
            business_name: "Reyes Courts".into(),
            business_type: "tennis".into(),
            business_location: "North Park".into(),
            business_image_url: None,
            opening_time: "7:00 AM".into(),
            closing_time: "9:00 PM".into(),
            comments: None,
        }
    }

    #[test]
    fn complete_request_is_valid() {
        assert!(validate_host_request(&request()).is_ok());
    }

    #[test]
    fn missing_required_field_is_named() {
        let body = CreateHostRequest {
            business_location: "  ".into(),
            ..request()
        };
        match validate_host_request(&body) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Business location is required"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decisions_map_to_statuses() {
        assert_eq!(RequestStatus::from(Decision::Approve), RequestStatus::Approved);
        assert_eq!(RequestStatus::from(Decision::Reject), RequestStatus::Rejected);
    }
}
