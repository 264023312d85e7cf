//! Success message constants used throughout the application.

// Authentication messages
pub const MSG_USER_REGISTERED: &str = "User registered successfully";
pub const MSG_LOGIN_SUCCESS: &str = "Login successful";
pub const MSG_LOGOUT_SUCCESS: &str = "Logout successful";

// Health
pub const MSG_SERVER_RUNNING: &str = "Server is running";
