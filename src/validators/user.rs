//! User-related custom validators.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::constants::ERR_INVALID_TEL;

lazy_static! {
    static ref TEL_PATTERN: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{2,19}$").unwrap();
}

/// Custom validator for telephone numbers: digits, spaces and dashes.
pub fn validate_tel(tel: &str) -> Result<(), ValidationError> {
    if TEL_PATTERN.is_match(tel.trim()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_tel");
        error.message = Some(ERR_INVALID_TEL.into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tel() {
        assert!(validate_tel("02-4340117").is_ok());
        assert!(validate_tel("+66 81 234 5678").is_ok());
        assert!(validate_tel("call me").is_err());
        assert!(validate_tel("1").is_err());
    }
}
