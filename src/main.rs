mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod query;
mod repositories;
mod routes;
mod services;
mod utils;
mod validators;

use actix_governor::Governor;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info, warn};
use mongodb::bson::doc;
use mongodb::Client;
use std::io;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::constants::CODE_BAD_REQUEST;
use crate::errors::ApiError;
use crate::middleware::{auth_rate_limiter_config, AuthMiddleware};
use crate::repositories::{AppointmentRepository, HospitalRepository, UserRepository};
use crate::services::{
    AppointmentService, AuthService, HospitalService, TokenBlacklist, UserService,
};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.mongodb_uri)
        .await
        .map_err(|e| startup_error("Failed to connect to MongoDB", e))?;

    let db = client.database(&CONFIG.database_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| startup_error("Failed to ping MongoDB", e))?;
    info!("Connected to MongoDB database {}", CONFIG.database_name);

    let users = Arc::new(UserRepository::new(&db));
    let hospitals = Arc::new(HospitalRepository::new(&db));
    let appointments = Arc::new(AppointmentRepository::new(&db));

    users
        .create_indexes()
        .await
        .map_err(|e| startup_error("Failed to create user indexes", e))?;
    hospitals
        .create_indexes()
        .await
        .map_err(|e| startup_error("Failed to create hospital indexes", e))?;
    appointments
        .create_indexes()
        .await
        .map_err(|e| startup_error("Failed to create appointment indexes", e))?;

    let user_service = web::Data::new(UserService::new(Arc::clone(&users)));
    let auth_service = web::Data::new(AuthService::new(users));
    let hospital_service = web::Data::new(HospitalService::new(
        Arc::clone(&hospitals),
        Arc::clone(&appointments),
    ));
    let appointment_service = web::Data::new(AppointmentService::new(appointments, hospitals));

    if let Err(e) = user_service.seed_admin().await {
        warn!("Admin seeding failed: {}", e);
    }

    let token_blacklist = TokenBlacklist::new();
    let blacklist_data = web::Data::new(token_blacklist.clone());

    let governor_config = auth_rate_limiter_config().ok_or_else(|| {
        startup_error(
            "Invalid auth rate limit",
            "AUTH_RATE_LIMIT_SECONDS and AUTH_RATE_LIMIT_BURST must be positive",
        )
    })?;

    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!(
        "Starting server in {} mode at http://{}",
        CONFIG.app_env, server_addr
    );

    let server = HttpServer::new(move || {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            ApiError::bad_request(CODE_BAD_REQUEST, &err.to_string()).into()
        });

        App::new()
            .wrap(Logger::default())
            .app_data(json_config)
            .app_data(user_service.clone())
            .app_data(auth_service.clone())
            .app_data(hospital_service.clone())
            .app_data(appointment_service.clone())
            .app_data(blacklist_data.clone())
            .service(
                web::scope("/api/v1/auth")
                    .wrap(AuthMiddleware::new(token_blacklist.clone()))
                    .wrap(Governor::new(&governor_config))
                    .configure(routes::configure_auth_routes),
            )
            .service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware::new(token_blacklist.clone()))
                    .configure(routes::configure_routes),
            )
    })
    .bind(&server_addr)?
    .run();

    if let Err(e) = server.await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
