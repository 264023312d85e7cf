//! Services organized by domain concern.

pub mod appointment_service;
pub mod auth_service;
pub mod hospital_service;
pub mod token_blacklist;
pub mod user_service;

pub use appointment_service::AppointmentService;
pub use auth_service::AuthService;
pub use hospital_service::HospitalService;
pub use token_blacklist::TokenBlacklist;
pub use user_service::UserService;
