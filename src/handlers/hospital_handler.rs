//! Hospital handlers. Reads are public; writes require an admin.

use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use validator::Validate;

use crate::constants::CODE_BAD_REQUEST;
use crate::errors::ApiError;
use crate::middleware::require_admin;
use crate::models::{
    ApiResponse, CreateHospitalRequest, ErrorResponse, FailureResponse, HospitalListResponse,
    HospitalResponse, ListResponse, UpdateHospitalRequest,
};
use crate::query::QueryParams;
use crate::services::HospitalService;
use crate::validators::validation_errors_to_api_error;

/// List hospitals with filtering, field selection, sorting, and pagination
///
/// Any other query parameter filters on the field of the same name.
/// `field[gt|gte|lt|lte|in]=value` applies a comparison; `in` takes a
/// comma-separated list or repeated parameters.
#[utoipa::path(
    get,
    path = "/api/v1/hospitals",
    tag = "Hospitals",
    params(
        ("select" = Option<String>, Query, description = "Comma-separated fields to return"),
        ("sort" = Option<String>, Query, description = "Comma-separated sort keys, `-` for descending"),
        ("page" = Option<u64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u64>, Query, description = "Page size (default 25)")
    ),
    responses(
        (status = 200, description = "Page of hospitals", body = HospitalListResponse),
        (status = 400, description = "Request failed", body = FailureResponse)
    )
)]
pub async fn get_hospitals(
    hospital_service: web::Data<HospitalService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let params = list_params(query);

    let (hospitals, pagination) = hospital_service
        .list(&params)
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(hospitals, pagination)))
}

/// Query pairs in arrival order, brackets and repeats intact.
fn list_params(query: web::Query<Vec<(String, String)>>) -> QueryParams {
    QueryParams::from(query.into_inner())
}

/// JSON body config for hospital writes: unreadable bodies get the bare failure.
pub fn hospital_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(CODE_BAD_REQUEST, &err.to_string())
            .into_bare_failure()
            .into()
    })
}

/// Get one hospital with its appointments
#[utoipa::path(
    get,
    path = "/api/v1/hospitals/{id}",
    tag = "Hospitals",
    params(("id" = String, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "Hospital found", body = HospitalResponse),
        (status = 400, description = "Request failed", body = FailureResponse)
    )
)]
pub async fn get_hospital(
    hospital_service: web::Data<HospitalService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let hospital = hospital_service
        .get(&path)
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(hospital)))
}

/// Create a hospital (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/hospitals",
    tag = "Hospitals",
    request_body = CreateHospitalRequest,
    responses(
        (status = 201, description = "Hospital created", body = HospitalResponse),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_hospital(
    req: HttpRequest,
    hospital_service: web::Data<HospitalService>,
    body: web::Json<CreateHospitalRequest>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_admin(&req)?;
    body
        .validate()
        .map_err(|e| validation_errors_to_api_error(e).into_bare_failure())?;

    let hospital = hospital_service
        .create(body.into_inner())
        .await
        .map_err(ApiError::into_failure)?;
    info!("Admin {} created hospital {}", claims.sub, hospital.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(hospital)))
}

/// Update a hospital (admin only)
#[utoipa::path(
    put,
    path = "/api/v1/hospitals/{id}",
    tag = "Hospitals",
    params(("id" = String, Path, description = "Hospital ID")),
    request_body = UpdateHospitalRequest,
    responses(
        (status = 200, description = "Hospital updated", body = HospitalResponse),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_hospital(
    req: HttpRequest,
    hospital_service: web::Data<HospitalService>,
    path: web::Path<String>,
    body: web::Json<UpdateHospitalRequest>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req)?;
    body
        .validate()
        .map_err(|e| validation_errors_to_api_error(e).into_bare_failure())?;

    let hospital = hospital_service
        .update(&path, body.into_inner())
        .await
        .map_err(ApiError::into_failure)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(hospital)))
}

/// Delete a hospital and its appointments (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/hospitals/{id}",
    tag = "Hospitals",
    params(("id" = String, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "Hospital deleted"),
        (status = 400, description = "Request failed", body = FailureResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_hospital(
    req: HttpRequest,
    hospital_service: web::Data<HospitalService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let claims = require_admin(&req)?;

    hospital_service
        .delete(&path)
        .await
        .map_err(ApiError::into_failure)?;
    info!("Admin {} deleted hospital {}", claims.sub, path.as_str());

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({}))))
}
