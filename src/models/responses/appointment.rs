//! Appointment response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Appointment, HospitalSummary};

use super::to_chrono;

/// Appointment returned in API responses
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct AppointmentResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appt_date: Option<DateTime<Utc>>,
    /// Id of the user who booked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Id of the hospital
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    /// Hospital details, when loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_details: Option<HospitalSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id.map(|id| id.to_hex()).unwrap_or_default(),
            appt_date: appointment.appt_date.map(to_chrono),
            user: appointment.user.map(|id| id.to_hex()),
            hospital: appointment.hospital.map(|id| id.to_hex()),
            hospital_details: None,
            created_at: appointment.created_at.map(to_chrono),
        }
    }
}

impl AppointmentResponse {
    pub fn with_hospital(mut self, hospital: Option<HospitalSummary>) -> Self {
        self.hospital_details = hospital;
        self
    }
}
