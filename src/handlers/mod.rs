//! HTTP handlers organized by resource.

pub mod appointment_handler;
pub mod auth_handler;
pub mod health_handler;
pub mod hospital_handler;

pub use appointment_handler::*;
pub use auth_handler::*;
pub use health_handler::*;
pub use hospital_handler::*;
