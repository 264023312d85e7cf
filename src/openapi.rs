use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    AppointmentListResponse, AppointmentRequest, AppointmentResponse, AuthResponse,
    CreateHospitalRequest, ErrorResponse, FailureResponse, HealthResponse, HospitalListResponse,
    HospitalResponse, HospitalSummary, LoginRequest, RegisterRequest, Role, UpdateHospitalRequest,
    UserResponse,
};
use crate::query::{PageLink, Pagination};

/// OpenAPI documentation for the Hospital Booking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hospital Booking API",
        version = "1.0.0",
        description = "REST API for browsing hospitals and booking appointments. List endpoints accept field filters (`field=value`, `field[gt|gte|lt|lte|in]=value`), `select`, `sort`, `page` and `limit`.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "Registration, login, profile and logout"),
        (name = "Hospitals", description = "Hospital listing and admin management"),
        (name = "Appointments", description = "Appointment booking")
    ),
    paths(
        crate::handlers::health_check,
        crate::handlers::register,
        crate::handlers::login,
        crate::handlers::get_me,
        crate::handlers::logout,
        crate::handlers::get_hospitals,
        crate::handlers::get_hospital,
        crate::handlers::create_hospital,
        crate::handlers::update_hospital,
        crate::handlers::delete_hospital,
        crate::handlers::get_appointments,
        crate::handlers::get_hospital_appointments,
        crate::handlers::get_appointment,
        crate::handlers::add_appointment,
        crate::handlers::update_appointment,
        crate::handlers::delete_appointment
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            CreateHospitalRequest,
            UpdateHospitalRequest,
            AppointmentRequest,
            Role,
            UserResponse,
            AuthResponse,
            HospitalResponse,
            HospitalSummary,
            AppointmentResponse,
            HospitalListResponse,
            AppointmentListResponse,
            Pagination,
            PageLink,
            ErrorResponse,
            FailureResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Bearer token scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
