//! User-related response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Role, User};

use super::to_chrono;

/// User data returned in API responses (without sensitive fields)
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct UserResponse {
    /// User's unique identifier
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "Somchai Jaidee")]
    pub name: String,
    #[schema(example = "081-234-5678")]
    pub tel: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            tel: user.tel,
            email: user.email,
            role: user.role,
            created_at: to_chrono(user.created_at),
        }
    }
}

/// Response for successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Whether the request was successful
    pub success: bool,
    /// Response message
    pub message: String,
    /// JWT token for authentication
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// User information
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User {
            id: Some(ObjectId::new()),
            name: "Somchai".to_string(),
            tel: "081".to_string(),
            email: "s@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: Role::User,
            created_at: mongodb::bson::DateTime::from_millis(0),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "user");
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
    }
}
