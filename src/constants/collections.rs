//! MongoDB collection names.

pub const COLLECTION_HOSPITALS: &str = "hospitals";
pub const COLLECTION_APPOINTMENTS: &str = "appointments";
pub const COLLECTION_USERS: &str = "users";
