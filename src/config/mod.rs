use std::env;
use std::str::FromStr;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: String,
    pub server_host: String,
    pub server_port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub auth_rate_limit_seconds: u64,
    pub auth_rate_limit_burst: u32,
    pub seed_admin: bool,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_tel: String,
    pub admin_password: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse `key`, falling back to `default` when unset or malformed.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let port_default = parsed_or("PORT", 5000);

        Self {
            app_env: var_or("APP_ENV", "development"),
            server_host: var_or("SERVER_HOST", "127.0.0.1"),
            server_port: parsed_or("SERVER_PORT", port_default),
            mongodb_uri: var_or("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: var_or("DATABASE_NAME", "hospital_booking"),
            jwt_secret: var_or("JWT_SECRET", "your-super-secret-jwt-key-change-in-production"),
            jwt_expiration_hours: parsed_or("JWT_EXPIRATION_HOURS", 720),
            auth_rate_limit_seconds: parsed_or("AUTH_RATE_LIMIT_SECONDS", 6),
            auth_rate_limit_burst: parsed_or("AUTH_RATE_LIMIT_BURST", 5),
            seed_admin: parsed_or("SEED_ADMIN", false),
            admin_name: var_or("ADMIN_NAME", "System Administrator"),
            admin_email: var_or("ADMIN_EMAIL", "admin@example.com"),
            admin_tel: var_or("ADMIN_TEL", "02-0000000"),
            admin_password: var_or("ADMIN_PASSWORD", "ChangeMe123!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_or_falls_back_on_garbage() {
        env::set_var("HOSPITAL_API_TEST_PORT", "not-a-port");
        assert_eq!(parsed_or::<u16>("HOSPITAL_API_TEST_PORT", 5000), 5000);

        env::set_var("HOSPITAL_API_TEST_PORT", " 8081 ");
        assert_eq!(parsed_or::<u16>("HOSPITAL_API_TEST_PORT", 5000), 8081);

        assert!(!parsed_or("HOSPITAL_API_TEST_UNSET_FLAG", false));
    }
}
