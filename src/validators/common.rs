//! Common validation utilities and helpers.

use mongodb::bson::oid::ObjectId;
use validator::ValidationErrors;

use crate::constants::{CODE_INVALID_ID, CODE_VALIDATION_FAILED, ERR_INVALID_ID};
use crate::errors::ApiError;

/// Maximum number of appointments a non-admin user may hold at once.
pub const MAX_APPOINTMENTS_PER_USER: u64 = 3;

/// Convert validator errors to ApiError::ValidationError.
///
/// This helper function extracts error messages from ValidationErrors
/// and converts them into a format suitable for API responses.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    errors.sort();
    ApiError::ValidationError {
        code: CODE_VALIDATION_FAILED.to_string(),
        errors,
    }
}

/// Parse a hex record id from a path or token.
///
/// A malformed id can never name a stored record, so it is reported as
/// not found.
pub fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::not_found(CODE_INVALID_ID, ERR_INVALID_ID))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(ApiError::NotFound { .. })
        ));
    }

    #[test]
    fn test_messages_are_collected() {
        let mut errors = ValidationErrors::new();
        let mut with_message = ValidationError::new("length");
        with_message.message = Some("Name is too long".into());
        errors.add("name", with_message);
        errors.add("tel", ValidationError::new("tel"));

        match validation_errors_to_api_error(errors) {
            ApiError::ValidationError { code, errors } => {
                assert_eq!(code, CODE_VALIDATION_FAILED);
                assert_eq!(errors, vec!["Name is too long", "tel is invalid"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
