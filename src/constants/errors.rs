//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Not authorized to access this route";
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ERR_EMAIL_EXISTS: &str = "Email already registered";

// Lookup errors
pub const ERR_INVALID_ID: &str = "Invalid ID format";
pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_HOSPITAL_NOT_FOUND: &str = "Hospital not found";
pub const ERR_APPOINTMENT_NOT_FOUND: &str = "Appointment not found";
pub const ERR_FAILED_FETCH_UPDATED: &str = "Failed to fetch updated record";

// Authorization errors
pub const ERR_NO_PERMISSION_APPOINTMENT: &str =
    "You don't have permission to access this appointment";

// Validation errors
pub const ERR_INVALID_TEL: &str = "Telephone number may only contain digits, spaces and dashes";
pub const ERR_INVALID_POSTALCODE: &str = "Postal code must be exactly 5 digits";
