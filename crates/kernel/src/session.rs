//! Process-wide session cache.
//!
//! Caches validated bearer sessions by token id so repeated requests on the
//! same credential skip signature verification. The cache has an explicit
//! lifecycle: [`SessionCache::init`] at startup, [`SessionCache::forget`] on
//! logout (clears the cached copy so a revoked credential cannot linger), and
//! [`SessionCache::teardown`] on shutdown.
//!
//! The resolver never reads this cache. It receives `(tenant_id, role)` as
//! explicit parameters; the cache exists purely on the HTTP side.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Role;

/// The authenticated context carried by a validated bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Tenant (school) the credential is scoped to.
    pub tenant_id: Uuid,

    /// Caller's role within the platform.
    pub role: Role,
}

/// Session cache with fast DashMap-based lookups.
#[derive(Clone)]
pub struct SessionCache {
    inner: Arc<DashMap<String, AuthSession>>,
}

impl SessionCache {
    /// Create an empty cache. Called once at startup.
    pub fn init() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Cache a validated session under its token id.
    pub fn remember(&self, token_id: &str, session: AuthSession) {
        self.inner.insert(token_id.to_string(), session);
    }

    /// Look up a cached session by token id.
    pub fn get(&self, token_id: &str) -> Option<AuthSession> {
        self.inner.get(token_id).map(|entry| *entry)
    }

    /// Drop one session (logout or revocation).
    pub fn forget(&self, token_id: &str) {
        self.inner.remove(token_id);
    }

    /// Drop every cached session. Called on shutdown.
    pub fn teardown(&self) {
        self.inner.clear();
    }

    /// Number of cached sessions (for monitoring).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn session() -> AuthSession {
        AuthSession {
            tenant_id: Uuid::now_v7(),
            role: Role::Teacher,
        }
    }

    #[test]
    fn remember_and_get() {
        let cache = SessionCache::init();
        let auth = session();
        cache.remember("tok-1", auth);
        assert_eq!(cache.get("tok-1"), Some(auth));
        assert_eq!(cache.get("tok-2"), None);
    }

    #[test]
    fn forget_removes_a_single_session() {
        let cache = SessionCache::init();
        cache.remember("tok-1", session());
        cache.remember("tok-2", session());
        cache.forget("tok-1");
        assert!(cache.get("tok-1").is_none());
        assert!(cache.get("tok-2").is_some());
    }

    #[test]
    fn teardown_clears_everything() {
        let cache = SessionCache::init();
        cache.remember("tok-1", session());
        cache.remember("tok-2", session());
        cache.teardown();
        assert!(cache.is_empty());
    }
}
