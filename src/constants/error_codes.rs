//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";

// Authentication errors
pub const CODE_AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const CODE_INVALID_TOKEN: &str = "INVALID_TOKEN";
pub const CODE_INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";

// Authorization errors
pub const CODE_FORBIDDEN: &str = "FORBIDDEN";
pub const CODE_UNAUTHORIZED_ACCESS: &str = "UNAUTHORIZED_ACCESS";

// Resource errors
pub const CODE_INVALID_ID: &str = "INVALID_ID";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_EMAIL_EXISTS: &str = "EMAIL_EXISTS";
pub const CODE_APPOINTMENT_LIMIT: &str = "APPOINTMENT_LIMIT";

// Generic errors
pub const CODE_BAD_REQUEST: &str = "BAD_REQUEST";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
