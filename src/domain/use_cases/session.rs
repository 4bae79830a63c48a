use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use chrono::Utc;
use parking_lot::Mutex;
use zeroize::Zeroizing;

/// Admin view access. Starts from whatever the session says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    LoggedOut,
    LoggedIn,
}

/// Session-scoped "admin unlocked" flag. Clones share the flag, so a
/// controller rebuilt with the same session (a reload) sees the login.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    admin: Arc<AtomicBool>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_admin(&self) -> bool {
        self.admin.load(Ordering::SeqCst)
    }

    pub fn mark_admin(&self) {
        self.admin.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.admin.store(false, Ordering::SeqCst);
    }
}

/// Single shared admin secret, compared in plaintext. No hashing, lockout or expiry.
#[derive(Clone)]
pub struct AdminGate {
    password: Zeroizing<String>,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        AdminGate { password: Zeroizing::new(password.into()) }
    }

    pub fn check(&self, attempt: &str) -> bool {
        !self.password.is_empty() && attempt == self.password.as_str()
    }
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate").field("password", &"[REDACTED]").finish()
    }
}

/// Millisecond-timestamp ids that never repeat within one process: when the
/// clock has not moved past the last id, the next id is `last + 1`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Mutex<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        self.next_after(Utc::now().timestamp_millis()).to_string()
    }

    fn next_after(&self, now_millis: i64) -> i64 {
        let mut last = self.last.lock();
        let next = now_millis.max(*last + 1);
        *last = next;
        next
    }
}
