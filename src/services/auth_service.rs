//! Authentication service for login, token handling, and password utilities.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, warn};
use std::sync::Arc;

use crate::config::CONFIG;
use crate::constants::{CODE_INTERNAL_ERROR, CODE_INVALID_CREDENTIALS, ERR_INVALID_CREDENTIALS};
use crate::errors::ApiError;
use crate::models::{Claims, LoginRequest, User};
use crate::repositories::UserRepository;
use crate::utils::mask_email;

/// Service for authentication operations.
pub struct AuthService {
    repository: Arc<UserRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Authenticate a user and return a JWT token.
    pub async fn login(&self, req: LoginRequest) -> Result<(User, String), ApiError> {
        let invalid_credentials =
            || ApiError::unauthorized(CODE_INVALID_CREDENTIALS, ERR_INVALID_CREDENTIALS);

        let user = self
            .repository
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: no account for {}", mask_email(&req.email));
                invalid_credentials()
            })?;

        if !verify_password(&req.password, &user.password_hash)? {
            warn!("Login failed: wrong password for {}", mask_email(&user.email));
            return Err(invalid_credentials());
        }

        let token = generate_token(&user)?;

        Ok((user, token))
    }
}

/// Hash a password using bcrypt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    Ok(verify(password, hash)?)
}

/// Generate a JWT token for a stored user.
pub fn generate_token(user: &User) -> Result<String, ApiError> {
    let user_id = user.id.ok_or_else(|| ApiError::InternalServerError {
        code: CODE_INTERNAL_ERROR.to_string(),
        message: "Cannot issue a token for an unsaved user".to_string(),
    })?;

    let now = Utc::now().timestamp().max(0) as usize;
    let lifetime = CONFIG.jwt_expiration_hours.max(0) as usize * 3600;

    let claims = Claims {
        sub: user_id.to_hex(),
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: now + lifetime,
        iat: now,
    };

    debug!(
        "Generated token for user {} with role {}",
        mask_email(&user.email),
        user.role
    );

    encode_claims(&claims)
}

/// Sign `claims` with the configured secret.
pub fn encode_claims(claims: &Claims) -> Result<String, ApiError> {
    Ok(encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(CONFIG.jwt_secret.as_bytes()),
    )?)
}

/// Verify a token's signature and expiry and return its claims.
pub fn decode_token(token: &str) -> Result<Claims, ApiError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(CONFIG.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use mongodb::bson::oid::ObjectId;

    fn user(id: Option<ObjectId>) -> User {
        User {
            id,
            name: "Somchai".to_string(),
            tel: "081-234-5678".to_string(),
            email: "somchai@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Admin,
            created_at: mongodb::bson::DateTime::now(),
        }
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hashed = hash_password("secret123").unwrap();
        assert_ne!(hashed, "secret123");
        assert!(verify_password("secret123", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_generated_token_decodes_to_user_claims() {
        let id = ObjectId::new();
        let token = generate_token(&user(Some(id))).unwrap();
        let claims = decode_token(&token).unwrap();

        assert_eq!(claims.sub, id.to_hex());
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_unsaved_user_gets_no_token() {
        assert!(generate_token(&user(None)).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = generate_token(&user(Some(ObjectId::new()))).unwrap();
        let tampered = format!("{}x", token);
        assert!(matches!(
            decode_token(&tampered),
            Err(ApiError::Unauthorized { .. })
        ));
    }
}
