//! Hospital response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{AppointmentResponse, Hospital};

use super::to_chrono;

/// Hospital returned in API responses; fields left out by `select` are omitted
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct HospitalResponse {
    /// The auto-generated id of the hospital
    #[schema(example = "61e9750a75bc69b195841547")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "เจ้าพระยา")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "10700")]
    pub postalcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Appointments booked at this hospital
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointments: Option<Vec<AppointmentResponse>>,
}

impl From<Hospital> for HospitalResponse {
    fn from(hospital: Hospital) -> Self {
        Self {
            id: hospital.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: hospital.name,
            address: hospital.address,
            district: hospital.district,
            province: hospital.province,
            postalcode: hospital.postalcode,
            tel: hospital.tel,
            region: hospital.region,
            created_at: hospital.created_at.map(to_chrono),
            appointments: None,
        }
    }
}

impl HospitalResponse {
    pub fn with_appointments(mut self, appointments: Vec<AppointmentResponse>) -> Self {
        self.appointments = Some(appointments);
        self
    }
}

/// Hospital fields embedded in appointment responses
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct HospitalSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
}

impl From<&Hospital> for HospitalSummary {
    fn from(hospital: &Hospital) -> Self {
        Self {
            id: hospital.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: hospital.name.clone(),
            province: hospital.province.clone(),
            tel: hospital.tel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projected_hospital_omits_missing_fields() {
        let hospital = Hospital {
            name: Some("Siriraj".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(HospitalResponse::from(hospital)).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Siriraj" }));
    }
}
