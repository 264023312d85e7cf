use actix_web::web;

use crate::handlers;

/// Routes under `/api/v1/auth`; mounted behind the rate limiter.
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(handlers::register))
        .route("/login", web::post().to(handlers::login))
        .route("/me", web::get().to(handlers::get_me))
        .route("/logout", web::get().to(handlers::logout));
}

/// Everything else under `/api/v1`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/docs/openapi.json", web::get().to(handlers::openapi_json))
        .service(
            web::scope("/hospitals")
                // Reads are public; writes are admin-only (checked in the handler)
                .service(
                    web::resource("")
                        .app_data(handlers::hospital_json_config())
                        .route(web::get().to(handlers::get_hospitals))
                        .route(web::post().to(handlers::create_hospital)),
                )
                .service(
                    web::resource("/{id}")
                        .app_data(handlers::hospital_json_config())
                        .route(web::get().to(handlers::get_hospital))
                        .route(web::put().to(handlers::update_hospital))
                        .route(web::delete().to(handlers::delete_hospital)),
                )
                // Appointments nested under a hospital
                .route(
                    "/{hospital_id}/appointments",
                    web::get().to(handlers::get_hospital_appointments),
                )
                .route(
                    "/{hospital_id}/appointments",
                    web::post().to(handlers::add_appointment),
                ),
        )
        .service(
            web::scope("/appointments")
                .route("", web::get().to(handlers::get_appointments))
                .route("/{id}", web::get().to(handlers::get_appointment))
                .route("/{id}", web::put().to(handlers::update_appointment))
                .route("/{id}", web::delete().to(handlers::delete_appointment)),
        );
}
