//! Session Token Storage
//!
//! The hosting application (for example a dashboard session) may hold a
//! bearer token that first-party requests should carry. The token is handed
//! to the request decorator through the [`BearerTokenProvider`] trait instead
//! of an ambient global, so each factory decides where it comes from.
//!
//! ## Example
//!
//! ```
//! use core_auth::{BearerTokenProvider, SessionTokenStore};
//!
//! let store = SessionTokenStore::new();
//! assert!(store.bearer_token().is_none());
//!
//! store.set_token("eyJhbGciOi...");
//! assert!(store.bearer_token().is_some());
//!
//! store.clear();
//! assert!(store.bearer_token().is_none());
//! ```

use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Source of the externally supplied bearer token.
///
/// Looked up once per first-party request; returning `None` (or an empty
/// string) means no session is active.
pub trait BearerTokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Provider for hosts that never supply a session token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBearerToken;

impl BearerTokenProvider for NoBearerToken {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Process-shared, settable session token.
///
/// Clones share the same slot, so the hosting application can keep one
/// handle to update the token while the factory holds another.
#[derive(Clone, Default)]
pub struct SessionTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current session token
    pub fn set_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
        debug!("Session token updated");
    }

    /// Drop the current session token
    pub fn clear(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            debug!("Session token cleared");
        }
    }
}

impl BearerTokenProvider for SessionTokenStore {
    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl fmt::Debug for SessionTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = self.bearer_token().is_some();
        f.debug_struct("SessionTokenStore")
            .field("token", &if present { "[REDACTED]" } else { "None" })
            .finish()
    }
}
