//! Rate limiting for the authentication endpoints.

use actix_governor::governor::clock::QuantaInstant;
use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};

use crate::config::CONFIG;

pub type AuthRateLimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Per-IP limiter for register/login/logout.
///
/// One request is replenished every `AUTH_RATE_LIMIT_SECONDS`, with bursts of
/// up to `AUTH_RATE_LIMIT_BURST`. Returns `None` if either setting is zero.
///
/// ```ignore
/// let config = auth_rate_limiter_config().ok_or(...)?;
/// web::scope("/auth").wrap(Governor::new(&config))
/// ```
pub fn auth_rate_limiter_config() -> Option<AuthRateLimiterConfig> {
    GovernorConfigBuilder::default()
        .per_second(CONFIG.auth_rate_limit_seconds)
        .burst_size(CONFIG.auth_rate_limit_burst)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_build_a_limiter() {
        assert!(CONFIG.auth_rate_limit_seconds > 0 && CONFIG.auth_rate_limit_burst > 0);
        assert!(auth_rate_limiter_config().is_some());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = GovernorConfigBuilder::default()
            .per_second(CONFIG.auth_rate_limit_seconds)
            .burst_size(0)
            .finish();
        assert!(config.is_none());
    }
}
