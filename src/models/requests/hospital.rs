//! Hospital request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::{validate_postalcode, validate_tel};

/// Request payload for creating a hospital (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHospitalRequest {
    /// Hospital name (max 50 characters)
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    #[schema(example = "เจ้าพระยา")]
    pub name: String,
    /// House No., Street, Road
    #[validate(length(min = 1, message = "Please add an address"))]
    #[schema(example = "113/44 ถ.พระบรมราชชนนี บางบำหรุ")]
    pub address: String,
    #[validate(length(min = 1, message = "Please add a district"))]
    #[schema(example = "บางพลัด")]
    pub district: String,
    #[validate(length(min = 1, message = "Please add a province"))]
    #[schema(example = "กรุงเทพมหานคร")]
    pub province: String,
    /// 5-digit postal code
    #[validate(custom(function = "validate_postalcode"))]
    #[schema(example = "10700")]
    pub postalcode: String,
    #[validate(custom(function = "validate_tel"))]
    #[schema(example = "02-4340117")]
    pub tel: Option<String>,
    #[validate(length(min = 1, message = "Please add a region"))]
    #[schema(example = "กรุงเทพมหานคร (Bangkok)")]
    pub region: String,
}

/// Request payload for updating a hospital (admin only); absent fields are kept
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateHospitalRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "District cannot be empty"))]
    pub district: Option<String>,
    #[validate(length(min = 1, message = "Province cannot be empty"))]
    pub province: Option<String>,
    #[validate(custom(function = "validate_postalcode"))]
    pub postalcode: Option<String>,
    #[validate(custom(function = "validate_tel"))]
    pub tel: Option<String>,
    #[validate(length(min = 1, message = "Region cannot be empty"))]
    pub region: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateHospitalRequest {
        CreateHospitalRequest {
            name: "Chaophraya".to_string(),
            address: "113/44 Borommaratchachonnani Rd".to_string(),
            district: "Bang Phlat".to_string(),
            province: "Bangkok".to_string(),
            postalcode: "10700".to_string(),
            tel: Some("02-4340117".to_string()),
            region: "Bangkok".to_string(),
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_postalcode_and_long_name() {
        let req = CreateHospitalRequest {
            name: "x".repeat(51),
            postalcode: "107".to_string(),
            ..create_request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("postalcode"));
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        assert!(UpdateHospitalRequest::default().validate().is_ok());

        let req = UpdateHospitalRequest {
            tel: Some("phone".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_required_field_fails_to_deserialize() {
        let body = serde_json::json!({ "name": "Only a name" });
        assert!(serde_json::from_value::<CreateHospitalRequest>(body).is_err());
    }
}
