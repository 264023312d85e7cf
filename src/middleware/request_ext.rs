//! Request extension trait for reading authentication state in handlers.

use actix_web::HttpMessage;

use crate::models::Claims;

/// The verified bearer token of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// Extension trait for reading what the AuthMiddleware attached.
pub trait RequestExt {
    /// Claims of a valid, unrevoked token; `None` for anonymous requests.
    fn get_claims(&self) -> Option<Claims>;

    /// The raw token the claims came from.
    fn get_token(&self) -> Option<BearerToken>;
}

impl RequestExt for actix_web::HttpRequest {
    fn get_claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }

    fn get_token(&self) -> Option<BearerToken> {
        self.extensions().get::<BearerToken>().cloned()
    }
}
