//! Response models for API endpoints.

pub mod api;
pub mod appointment;
pub mod hospital;
pub mod pagination;
pub mod user;

pub use api::*;
pub use appointment::*;
pub use hospital::*;
pub use pagination::*;
pub use user::*;

use chrono::{DateTime, Utc};

/// Convert a BSON timestamp for JSON output.
pub(crate) fn to_chrono(value: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}
