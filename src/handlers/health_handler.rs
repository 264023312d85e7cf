use actix_web::HttpResponse;

use crate::constants::MSG_SERVER_RUNNING;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;
use utoipa::OpenApi;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: MSG_SERVER_RUNNING.to_string(),
    })
}

/// Serve the generated OpenAPI document.
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().route("/health", web::get().to(health_check))).await;
        let resp: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
                .await;
        assert_eq!(resp["status"], "OK");
    }

    #[actix_web::test]
    async fn test_openapi_document_lists_hospital_paths() {
        let app =
            test::init_service(App::new().route("/openapi.json", web::get().to(openapi_json))).await;
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/openapi.json").to_request(),
        )
        .await;
        assert!(resp["paths"]["/api/v1/hospitals"].is_object());
        assert!(resp["paths"]["/api/v1/appointments/{id}"].is_object());
    }
}
