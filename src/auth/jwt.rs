use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::UserRole;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

pub const TOKEN_EXPIRY_HOURS: i64 = 24;

pub fn create_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    secret: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        exp: (now + Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token creation failed: {e}")))
}

pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_identity_and_role() {
        let id = Uuid::new_v4();
        let token = create_token(id, "host@example.com", UserRole::Host, "k").unwrap();
        let claims = validate_token(&token, "k").unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "host@example.com");
        assert_eq!(claims.role, UserRole::Host);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = create_token(Uuid::new_v4(), "a@b.c", UserRole::User, "k").unwrap();
        assert!(matches!(
            validate_token(&token, "other"),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            validate_token("garbage", "k"),
            Err(AppError::Unauthorized)
        ));
    }
}
