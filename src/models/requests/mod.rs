//! Request models for API endpoints.

pub mod appointment;
pub mod auth;
pub mod hospital;

pub use appointment::*;
pub use auth::*;
pub use hospital::*;
