//! Role names as stored on users and carried in JWT claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
