//! Revoked-token store backing logout.
//!
//! Revoked tokens are held in memory, keyed by a hash of the token, until the
//! token's own `exp` passes. After that the signature check rejects it anyway.

use chrono::Utc;
use dashmap::DashMap;
use log::{debug, info};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Seconds between sweeps of expired entries.
const SWEEP_INTERVAL_SECS: i64 = 300;

/// Shared set of revoked tokens, cheap to clone into each worker.
#[derive(Clone)]
pub struct TokenBlacklist {
    /// token hash -> expiry (unix seconds)
    revoked: Arc<DashMap<u64, i64>>,
    last_sweep: Arc<RwLock<i64>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            revoked: Arc::new(DashMap::new()),
            last_sweep: Arc::new(RwLock::new(Utc::now().timestamp())),
        }
    }

    /// Revoke `token` until `exp` (unix seconds). Already-expired tokens are ignored.
    pub async fn blacklist_token(&self, token: &str, exp: usize) {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(exp).unwrap_or(i64::MAX);

        if exp > now {
            self.revoked.insert(Self::hash_token(token), exp);
            debug!("Token revoked for the next {}s", exp - now);
        }

        self.maybe_sweep(now).await;
    }

    /// Whether `token` has been revoked and has not yet expired.
    pub fn is_blacklisted(&self, token: &str) -> bool {
        let key = Self::hash_token(token);
        let now = Utc::now().timestamp();

        match self.revoked.get(&key).map(|exp| *exp) {
            Some(exp) if exp > now => true,
            Some(_) => {
                self.revoked.remove(&key);
                false
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }

    fn hash_token(token: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    async fn maybe_sweep(&self, now: i64) {
        if now - *self.last_sweep.read().await < SWEEP_INTERVAL_SECS {
            return;
        }

        let mut last = self.last_sweep.write().await;
        if now - *last < SWEEP_INTERVAL_SECS {
            return;
        }

        let before = self.revoked.len();
        self.revoked.retain(|_, exp| *exp > now);
        let removed = before - self.revoked.len();
        if removed > 0 {
            info!(
                "Token blacklist sweep: removed {} expired entries, {} remaining",
                removed,
                self.revoked.len()
            );
        }
        *last = now;
    }
}

impl Default for TokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_an_hour() -> usize {
        (Utc::now().timestamp() + 3600) as usize
    }

    #[tokio::test]
    async fn test_revoked_token_is_blacklisted() {
        let blacklist = TokenBlacklist::new();
        blacklist.blacklist_token("token-a", in_an_hour()).await;

        assert!(blacklist.is_blacklisted("token-a"));
        assert!(!blacklist.is_blacklisted("token-b"));
    }

    #[tokio::test]
    async fn test_expired_token_is_not_stored() {
        let blacklist = TokenBlacklist::new();
        blacklist.blacklist_token("old", 1).await;

        assert!(blacklist.is_empty());
        assert!(!blacklist.is_blacklisted("old"));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let blacklist = TokenBlacklist::new();
        let worker_copy = blacklist.clone();
        blacklist.blacklist_token("shared", in_an_hour()).await;

        assert!(worker_copy.is_blacklisted("shared"));
    }
}
