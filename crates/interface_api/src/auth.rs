//! Authentication
//!
//! Requests carry an HS256 bearer token whose `sub` claim is the user id.
//! In offline mode every request acts as [`OFFLINE_USER`] instead.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UserId;

/// Identity used for every request in offline mode
pub const OFFLINE_USER: &str = "testUser";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Subject is not a usable user id")]
    InvalidSubject,
}

/// Issues a token for `user_id`
pub fn create_token(user_id: &str, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates signature and expiry of a token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Resolves the caller from an `Authorization` header value
pub fn authenticate(header: Option<&str>, secret: &str) -> Result<UserId, AuthError> {
    let token = header
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;
    let claims = validate_token(token, secret)?;
    UserId::parse(claims.sub).map_err(|_| AuthError::InvalidSubject)
}

/// The fixed offline identity
pub fn offline_user() -> Result<UserId, AuthError> {
    UserId::parse(OFFLINE_USER).map_err(|_| AuthError::InvalidSubject)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = create_token("alice", SECRET, 60).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("alice", SECRET, 60).unwrap();
        assert!(matches!(validate_token(&token, "other"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "alice".into(),
            exp: past.timestamp(),
            iat: (past - Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_authenticate_header() {
        let token = create_token("alice", SECRET, 60).unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(authenticate(Some(&header), SECRET).unwrap().as_str(), "alice");
        assert!(matches!(authenticate(None, SECRET), Err(AuthError::MissingToken)));
        assert!(matches!(authenticate(Some(&token), SECRET), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_subject_with_delimiter_rejected() {
        let token = create_token("a#b", SECRET, 60).unwrap();
        let header = format!("Bearer {}", token);
        assert!(matches!(authenticate(Some(&header), SECRET), Err(AuthError::InvalidSubject)));
    }

    #[test]
    fn test_offline_user() {
        assert_eq!(offline_user().unwrap().as_str(), OFFLINE_USER);
    }
}
