//! User service for registration, profile lookup, and admin seeding.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::config::CONFIG;
use crate::constants::{CODE_EMAIL_EXISTS, CODE_NOT_FOUND, ERR_EMAIL_EXISTS, ERR_USER_NOT_FOUND};
use crate::errors::ApiError;
use crate::models::{RegisterRequest, Role, User};
use crate::repositories::UserRepository;
use crate::services::auth_service::hash_password;
use crate::utils::mask_email;
use crate::validators::parse_object_id;

pub struct UserService {
    repository: Arc<UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Create a regular user account.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, ApiError> {
        if self.repository.find_by_email(&req.email).await?.is_some() {
            warn!(
                "Registration failed: {} already registered",
                mask_email(&req.email)
            );
            return Err(ApiError::conflict(CODE_EMAIL_EXISTS, ERR_EMAIL_EXISTS));
        }

        let password_hash = hash_password(&req.password)?;

        let user = User {
            id: None,
            name: req.name.trim().to_string(),
            tel: req.tel.trim().to_string(),
            email: req.email.to_lowercase(),
            password_hash,
            role: Role::User,
            created_at: mongodb::bson::DateTime::now(),
        };

        let id = self.repository.insert(&user).await?;
        info!("Registered user {} ({})", id, mask_email(&user.email));

        Ok(User {
            id: Some(id),
            ..user
        })
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<User, ApiError> {
        debug!("Fetching user by ID: {}", id);
        let object_id = parse_object_id(id)?;

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::not_found(CODE_NOT_FOUND, ERR_USER_NOT_FOUND))
    }

    /// Seed the database with an initial admin user if no admin exists.
    /// Called on startup when SEED_ADMIN is true.
    pub async fn seed_admin(&self) -> Result<(), ApiError> {
        if !CONFIG.seed_admin {
            info!("Admin seeding is disabled (SEED_ADMIN=false)");
            return Ok(());
        }

        if self.repository.find_by_role(Role::Admin).await?.is_some() {
            info!("Admin user already exists, skipping seed");
            return Ok(());
        }

        if self
            .repository
            .find_by_email(&CONFIG.admin_email)
            .await?
            .is_some()
        {
            warn!(
                "User with email {} already exists but is not an admin",
                mask_email(&CONFIG.admin_email)
            );
            return Ok(());
        }

        let admin = User {
            id: None,
            name: CONFIG.admin_name.clone(),
            tel: CONFIG.admin_tel.clone(),
            email: CONFIG.admin_email.to_lowercase(),
            password_hash: hash_password(&CONFIG.admin_password)?,
            role: Role::Admin,
            created_at: mongodb::bson::DateTime::now(),
        };

        self.repository.insert(&admin).await?;

        info!(
            "Admin user created successfully: {}",
            mask_email(&CONFIG.admin_email)
        );
        warn!("Please change the default admin password after first login!");

        Ok(())
    }
}
