//! Authentication and authorization helpers for handlers.

use actix_web::HttpRequest;
use log::warn;

use crate::constants::{CODE_AUTH_REQUIRED, CODE_FORBIDDEN, ERR_AUTH_REQUIRED, ROLE_ADMIN};
use crate::errors::ApiError;
use crate::models::Claims;

use super::RequestExt;

/// Extract claims from the request or return 401.
///
/// # Example
/// ```ignore
/// let claims = require_auth(&req)?;
/// ```
pub fn require_auth(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.get_claims().ok_or_else(|| {
        warn!("Unauthenticated request to {}", req.path());
        ApiError::unauthorized(CODE_AUTH_REQUIRED, ERR_AUTH_REQUIRED)
    })
}

/// Require one of `roles` or return 403.
pub fn require_role(claims: &Claims, roles: &[&str]) -> Result<(), ApiError> {
    if claims.has_role(roles) {
        return Ok(());
    }
    warn!(
        "User {} with role {} denied; requires one of {:?}",
        claims.sub, claims.role, roles
    );
    Err(ApiError::forbidden(
        CODE_FORBIDDEN,
        &format!(
            "User role {} is not authorized to access this route",
            claims.role
        ),
    ))
}

/// Authenticate and require the admin role in one step.
pub fn require_admin(req: &HttpRequest) -> Result<Claims, ApiError> {
    let claims = require_auth(req)?;
    require_role(&claims, &[ROLE_ADMIN])?;
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROLE_USER;
    use crate::middleware::AuthMiddleware;
    use crate::services::auth_service::encode_claims;
    use crate::services::TokenBlacklist;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App, HttpResponse};
    use chrono::Utc;

    async fn admin_only(req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let claims = require_admin(&req)?;
        Ok(HttpResponse::Ok().body(claims.sub))
    }

    async fn any_user(req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let claims = require_auth(&req)?;
        require_role(&claims, &[ROLE_ADMIN, ROLE_USER])?;
        Ok(HttpResponse::Ok().finish())
    }

    fn token(role: &str) -> String {
        let now = Utc::now().timestamp() as usize;
        encode_claims(&Claims {
            sub: "64b000000000000000000001".to_string(),
            email: "someone@example.com".to_string(),
            role: role.to_string(),
            exp: now + 3600,
            iat: now,
        })
        .unwrap()
    }

    macro_rules! app {
        ($blacklist:expr) => {
            actix_test::init_service(
                App::new()
                    .wrap(AuthMiddleware::new($blacklist))
                    .route("/admin", web::get().to(admin_only))
                    .route("/any", web::get().to(any_user)),
            )
            .await
        };
    }

    fn get(path: &str, token: Option<&str>) -> actix_test::TestRequest {
        let req = actix_test::TestRequest::get().uri(path);
        match token {
            Some(token) => req.insert_header(("Authorization", format!("Bearer {}", token))),
            None => req,
        }
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = app!(TokenBlacklist::new());
        let resp = actix_test::call_service(&app, get("/any", None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = app!(TokenBlacklist::new());
        let resp = actix_test::call_service(&app, get("/any", Some("not.a.jwt")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_role_gate() {
        let app = app!(TokenBlacklist::new());

        let user = token(ROLE_USER);
        let resp = actix_test::call_service(&app, get("/any", Some(&user)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = actix_test::call_service(&app, get("/admin", Some(&user)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let admin = token(ROLE_ADMIN);
        let resp = actix_test::call_service(&app, get("/admin", Some(&admin)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_revoked_token_is_unauthorized() {
        let blacklist = TokenBlacklist::new();
        let admin = token(ROLE_ADMIN);
        blacklist
            .blacklist_token(&admin, Utc::now().timestamp() as usize + 3600)
            .await;

        let app = app!(blacklist);
        let resp = actix_test::call_service(&app, get("/admin", Some(&admin)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_message_names_role() {
        let claims = Claims {
            sub: "x".to_string(),
            email: "x@example.com".to_string(),
            role: ROLE_USER.to_string(),
            exp: 0,
            iat: 0,
        };
        match require_role(&claims, &[ROLE_ADMIN]) {
            Err(ApiError::Forbidden { message, .. }) => {
                assert_eq!(message, "User role user is not authorized to access this route")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
