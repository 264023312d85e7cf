//! Authentication handlers for registration, login, profile, and logout.

use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use validator::Validate;

use crate::constants::{MSG_LOGIN_SUCCESS, MSG_LOGOUT_SUCCESS, MSG_USER_REGISTERED};
use crate::errors::ApiError;
use crate::middleware::{require_auth, RequestExt};
use crate::models::{
    ApiResponse, AuthResponse, ErrorResponse, LoginRequest, RegisterRequest, UserResponse,
};
use crate::services::auth_service::generate_token;
use crate::services::{AuthService, TokenBlacklist, UserService};
use crate::utils::mask_email;
use crate::validators::validation_errors_to_api_error;

/// Register a new user account and sign them in
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    user_service: web::Data<UserService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let user = user_service.register(body.into_inner()).await?;
    let token = generate_token(&user)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        message: MSG_USER_REGISTERED.to_string(),
        token,
        user: user.into(),
    }))
}

/// Authenticate a user and get a JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let (user, token) = auth_service.login(body.into_inner()).await?;
    info!("User {} logged in", mask_email(&user.email));

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        message: MSG_LOGIN_SUCCESS.to_string(),
        token,
        user: user.into(),
    }))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    req: HttpRequest,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    let user = user_service.get_user_by_id(&claims.sub).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Log out, revoking the current token until it expires
#[utoipa::path(
    get,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout(
    req: HttpRequest,
    token_blacklist: web::Data<TokenBlacklist>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;

    if let Some(token) = req.get_token() {
        token_blacklist.blacklist_token(&token.0, claims.exp).await;
        info!("User {} logged out", claims.sub);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_LOGOUT_SUCCESS)))
}
