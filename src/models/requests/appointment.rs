//! Appointment request models.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

/// Request payload for booking or rescheduling an appointment
#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentRequest {
    /// Appointment date and time (RFC 3339)
    #[schema(example = "2026-11-02T09:00:00Z")]
    pub appt_date: DateTime<Utc>,
}
