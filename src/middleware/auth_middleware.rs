//! JWT identification middleware.
//!
//! Routes are public or protected per method on the same path, so this
//! middleware never rejects a request. It attaches the claims of a valid,
//! unrevoked bearer token and leaves enforcement to `require_auth` and
//! `require_role` in the handlers.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::debug;
use std::rc::Rc;

use crate::services::auth_service::decode_token;
use crate::services::TokenBlacklist;
use crate::utils::mask_token;

use super::BearerToken;

pub struct AuthMiddleware {
    blacklist: TokenBlacklist,
}

impl AuthMiddleware {
    pub fn new(blacklist: TokenBlacklist) -> Self {
        Self { blacklist }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
            blacklist: self.blacklist.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    blacklist: TokenBlacklist,
}

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let blacklist = self.blacklist.clone();

        Box::pin(async move {
            if let Some(token) = bearer_token(&req) {
                if blacklist.is_blacklisted(&token) {
                    debug!("Ignoring revoked token {}", mask_token(&token));
                } else {
                    match decode_token(&token) {
                        Ok(claims) => {
                            req.extensions_mut().insert(claims);
                            req.extensions_mut().insert(BearerToken(token));
                        }
                        Err(e) => debug!("Ignoring invalid token {}: {}", mask_token(&token), e),
                    }
                }
            }

            service.call(req).await
        })
    }
}
