//! Appointment handlers. Every route requires a signed-in user or admin.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::errors::ApiError;
use crate::middleware::{require_auth, require_role};
use crate::models::{
    AppointmentListResponse, AppointmentRequest, AppointmentResponse, ApiResponse, Claims,
    ErrorResponse, FailureResponse, ListResponse,
};
use crate::query::QueryParams;
use crate::services::AppointmentService;

fn require_booking_role(req: &HttpRequest) -> Result<Claims, ApiError> {
    let claims = require_auth(req)?;
    require_role(&claims, &[ROLE_ADMIN, ROLE_USER])?;
    Ok(claims)
}

/// List appointments; users see their own, admins see all
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    tag = "Appointments",
    params(
        ("select" = Option<String>, Query, description = "Comma-separated fields to return"),
        ("sort" = Option<String>, Query, description = "Comma-separated sort keys, `-` for descending"),
        ("page" = Option<u64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u64>, Query, description = "Page size (default 25)")
    ),
    responses(
        (status = 200, description = "Page of appointments", body = AppointmentListResponse),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "User or admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_appointments(
    req: HttpRequest,
    appointment_service: web::Data<AppointmentService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_booking_role(&req)?;
    let params = QueryParams::from(query.into_inner());

    let (appointments, pagination) = appointment_service
        .list(&params, &claims, None)
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(appointments, pagination)))
}

/// List appointments at one hospital
#[utoipa::path(
    get,
    path = "/api/v1/hospitals/{hospital_id}/appointments",
    tag = "Appointments",
    params(("hospital_id" = String, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "Page of appointments", body = AppointmentListResponse),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "User or admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_hospital_appointments(
    req: HttpRequest,
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_booking_role(&req)?;
    let params = QueryParams::from(query.into_inner());

    let (appointments, pagination) = appointment_service
        .list(&params, &claims, Some(path.as_str()))
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(appointments, pagination)))
}

/// Get one appointment (owner or admin)
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment found", body = AppointmentResponse),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated or not the owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_appointment(
    req: HttpRequest,
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_booking_role(&req)?;

    let appointment = appointment_service
        .get(&path, &claims)
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(appointment)))
}

/// Book an appointment at a hospital
#[utoipa::path(
    post,
    path = "/api/v1/hospitals/{hospital_id}/appointments",
    tag = "Appointments",
    params(("hospital_id" = String, Path, description = "Hospital ID")),
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked", body = AppointmentResponse),
        (status = 400, description = "Appointment limit reached or request failed", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_appointment(
    req: HttpRequest,
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<String>,
    body: web::Json<AppointmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_booking_role(&req)?;

    let appointment = appointment_service
        .create(&path, &claims, body.into_inner())
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(appointment)))
}

/// Reschedule an appointment (owner or admin)
#[utoipa::path(
    put,
    path = "/api/v1/appointments/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentResponse),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated or not the owner", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_appointment(
    req: HttpRequest,
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<String>,
    body: web::Json<AppointmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_booking_role(&req)?;

    let appointment = appointment_service
        .update(&path, &claims, body.into_inner())
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(appointment)))
}

/// Cancel an appointment (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/appointments/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment deleted"),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated or not the owner", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_appointment(
    req: HttpRequest,
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_booking_role(&req)?;

    appointment_service
        .delete(&path, &claims)
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({}))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, HttpMessage};
    use mongodb::bson::oid::ObjectId;

    fn request_as(role: Option<&str>) -> HttpRequest {
        let req = test::TestRequest::get()
            .uri("/api/v1/appointments")
            .to_http_request();
        if let Some(role) = role {
            req.extensions_mut().insert(Claims {
                sub: ObjectId::new().to_hex(),
                email: "caller@example.com".to_string(),
                role: role.to_string(),
                exp: 0,
                iat: 0,
            });
        }
        req
    }

    #[actix_web::test]
    async fn test_booking_role_gate() {
        assert!(matches!(
            require_booking_role(&request_as(None)),
            Err(ApiError::Unauthorized { .. })
        ));
        assert!(matches!(
            require_booking_role(&request_as(Some("guest"))),
            Err(ApiError::Forbidden { .. })
        ));
        assert_eq!(
            require_booking_role(&request_as(Some(ROLE_USER))).unwrap().role,
            ROLE_USER
        );
        assert!(require_booking_role(&request_as(Some(ROLE_ADMIN))).is_ok());
    }
}
