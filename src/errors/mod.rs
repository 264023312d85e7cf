use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::warn;
use std::fmt;

use crate::constants::{CODE_INTERNAL_ERROR, CODE_INVALID_TOKEN};
use crate::models::{ErrorResponse, FailureResponse};

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Unauthorized { code: String, message: String },
    Forbidden { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: Vec<String> },
    /// Generic entity failure, rendered as 400 `{"success": false}`.
    RequestFailed,
}

impl ApiError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unauthorized(code: &str, message: &str) -> Self {
        ApiError::Unauthorized {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn forbidden(code: &str, message: &str) -> Self {
        ApiError::Forbidden {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn not_found(code: &str, message: &str) -> Self {
        ApiError::NotFound {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        ApiError::Conflict {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal(message: &str) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: message.to_string(),
        }
    }

    /// Collapse into the generic failure envelope at an entity handler boundary.
    ///
    /// Missing records and infrastructure errors become `RequestFailed`;
    /// rejections the caller can act on keep their own shape.
    pub fn into_failure(self) -> Self {
        match self {
            ApiError::BadRequest { .. }
            | ApiError::Unauthorized { .. }
            | ApiError::Forbidden { .. }
            | ApiError::Conflict { .. }
            | ApiError::ValidationError { .. }
            | ApiError::RequestFailed => self,
            other => {
                warn!("Request failed: {}", other);
                ApiError::RequestFailed
            }
        }
    }

    /// Collapse everything except the auth gate into `RequestFailed`.
    ///
    /// Hospital writes report bad bodies and validation failures this way.
    pub fn into_bare_failure(self) -> Self {
        match self {
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } | ApiError::RequestFailed => {
                self
            }
            other => {
                warn!("Request failed: {}", other);
                ApiError::RequestFailed
            }
        }
    }

    fn body(code: &str, message: &str) -> ErrorResponse {
        ErrorResponse {
            success: false,
            code: code.to_string(),
            message: message.to_string(),
            errors: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::Unauthorized { code, message } => {
                write!(f, "Unauthorized [{}]: {}", code, message)
            }
            ApiError::Forbidden { code, message } => {
                write!(f, "Forbidden [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::Conflict { code, message } => {
                write!(f, "Conflict [{}]: {}", code, message)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
            ApiError::RequestFailed => write!(f, "Request failed"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. }
            | ApiError::ValidationError { .. }
            | ApiError::RequestFailed => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::BadRequest { code, message }
            | ApiError::Unauthorized { code, message }
            | ApiError::Forbidden { code, message }
            | ApiError::NotFound { code, message }
            | ApiError::Conflict { code, message }
            | ApiError::InternalServerError { code, message } => {
                builder.json(Self::body(code, message))
            }
            ApiError::ValidationError { code, errors } => builder.json(ErrorResponse {
                success: false,
                code: code.clone(),
                message: "Validation failed".to_string(),
                errors: Some(errors.clone()),
            }),
            ApiError::RequestFailed => builder.json(FailureResponse { success: false }),
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Unauthorized {
            code: CODE_INVALID_TOKEN.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_request_failed_is_fixed_shape() {
        let (status, body) = body_json(ApiError::RequestFailed).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "success": false }));
    }

    #[actix_web::test]
    async fn test_structured_errors_carry_code() {
        let (status, body) = body_json(ApiError::forbidden("FORBIDDEN", "nope")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "FORBIDDEN");
        assert_eq!(body["message"], "nope");
    }

    #[test]
    fn test_into_failure_keeps_auth_and_validation() {
        assert!(matches!(
            ApiError::unauthorized("A", "b").into_failure(),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::ValidationError {
                code: "V".to_string(),
                errors: vec![]
            }
            .into_failure(),
            ApiError::ValidationError { .. }
        ));
        assert!(matches!(
            ApiError::bad_request("APPOINTMENT_LIMIT", "too many").into_failure(),
            ApiError::BadRequest { .. }
        ));
        assert!(matches!(
            ApiError::not_found("NOT_FOUND", "gone").into_failure(),
            ApiError::RequestFailed
        ));
        assert!(matches!(
            ApiError::internal("boom").into_failure(),
            ApiError::RequestFailed
        ));
    }

    #[test]
    fn test_into_bare_failure_keeps_only_auth_gate() {
        assert!(matches!(
            ApiError::forbidden("F", "no").into_bare_failure(),
            ApiError::Forbidden { .. }
        ));
        assert!(matches!(
            ApiError::unauthorized("A", "b").into_bare_failure(),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::ValidationError {
                code: "V".to_string(),
                errors: vec!["Name is required".to_string()]
            }
            .into_bare_failure(),
            ApiError::RequestFailed
        ));
        assert!(matches!(
            ApiError::bad_request("BAD_REQUEST", "expected value").into_bare_failure(),
            ApiError::RequestFailed
        ));
    }
}
