use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

use crate::auth::middleware::{AuthUser, COOKIE_NAME};
use crate::auth::{jwt, password};
use crate::error::AppError;
use crate::models::user::{LoginRequest, RegisterRequest, User, UserResponse, UserRole};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::BadRequest("A valid email address is required".into())),
    }
}

async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<UserResponse>), AppError> {
    let email = normalize_email(&body.email)?;
    password::validate_password(&body.password)?;

    // The first account administers the site
    let (user_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await?;
    let role = if user_count == 0 {
        UserRole::Admin
    } else {
        UserRole::User
    };

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.db)
        .await?;

    if existing > 0 {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = password::hash_password(&body.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash, role)
         VALUES ($1, $2, $3)
         RETURNING id, email, password_hash, role, created_at, updated_at",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(role)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(user_id = %user.id, role = ?user.role, "registered user");

    let token = jwt::create_token(user.id, &user.email, user.role, &state.config.jwt_secret)?;
    Ok((jar.add(build_auth_cookie(token)), Json(UserResponse::from(user))))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), AppError> {
    let email = body.email.trim().to_lowercase();

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, role, created_at, updated_at
         FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::create_token(user.id, &user.email, user.role, &state.config.jwt_secret)?;
    Ok((jar.add(build_auth_cookie(token)), Json(UserResponse::from(user))))
}

async fn logout(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(COOKIE_NAME).path("/"))
}

async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, role, created_at, updated_at
         FROM users WHERE id = $1",
    )
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::Unauthorized)?;

    Ok(Json(UserResponse::from(user)))
}

fn build_auth_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(jwt::TOKEN_EXPIRY_HOURS))
        .build()
}
