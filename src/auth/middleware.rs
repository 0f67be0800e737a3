use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::UserRole;
use crate::AppState;

use super::jwt;

pub const COOKIE_NAME: &str = "token";

/// The acting user, passed explicitly into every booking operation.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_host(&self) -> bool {
        self.role == UserRole::Host
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".into()))
        }
    }
}

fn user_from_jar(jar: &CookieJar, secret: &str) -> Result<AuthUser, AppError> {
    let token = jar.get(COOKIE_NAME).ok_or(AppError::Unauthorized)?;
    let claims = jwt::validate_token(token.value(), secret)?;

    Ok(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = <CookieJar as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;

        user_from_jar(&jar, &state.config.jwt_secret)
    }
}

/// Anonymous visitors and stale sessions both come through as `None`.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let jar = <CookieJar as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;

        Ok(user_from_jar(&jar, &state.config.jwt_secret).ok())
    }
}
