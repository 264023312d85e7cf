//! Hospital-related custom validators.

use validator::ValidationError;

use crate::constants::ERR_INVALID_POSTALCODE;

/// Custom validator for Thai postal codes (exactly five digits).
pub fn validate_postalcode(code: &str) -> Result<(), ValidationError> {
    if code.len() == 5 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_postalcode");
        error.message = Some(ERR_INVALID_POSTALCODE.into());
        Err(error)
    }
}
