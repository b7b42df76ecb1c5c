//! # Access Gate
//!
//! A single shared passcode guards the admin session. There are no accounts,
//! no hashing and no attempt limiting here; callers that want a lockout policy
//! count failures themselves.
//!
//! The session flag lives in the same [`KvStore`] as the jobs, under its own
//! key. Only a successful [`AccessGate::authenticate`] creates it and only
//! [`AccessGate::logout`] removes it.

use crate::store::KvStore;
use tracing::{debug, warn};

pub const DEFAULT_SESSION_KEY: &str = "admin_session";

const SESSION_ON: &[u8] = b"true";

#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: String,
    session_key: String,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>, session_key: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            session_key: session_key.into(),
        }
    }

    /// Exact comparison against the configured passcode. A wrong candidate
    /// leaves any existing session as it is.
    pub fn authenticate<S: KvStore>(&self, store: &S, candidate: &str) -> bool {
        if candidate != self.secret {
            debug!("Rejected admin passcode");
            return false;
        }
        if let Err(e) = store.write(&self.session_key, SESSION_ON) {
            warn!(error = %e, "Could not persist admin session");
        }
        true
    }

    pub fn is_authenticated<S: KvStore>(&self, store: &S) -> bool {
        match store.read(&self.session_key) {
            Ok(Some(bytes)) => bytes.trim_ascii() == SESSION_ON,
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Could not read admin session");
                false
            }
        }
    }

    pub fn logout<S: KvStore>(&self, store: &S) {
        if let Err(e) = store.remove(&self.session_key) {
            warn!(error = %e, "Could not clear admin session");
        }
    }
}
