use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use thiserror::Error;

use redacta_core::{Mode, QuotaLimits, UserId};

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("activation code not recognized")]
    InvalidActivationCode,
}

/// One issued user. Revocation is a soft flag; records are never removed.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Which activation code minted this user.
    pub code_used: String,
    /// RFC3339 activation timestamp.
    pub activated_at: String,
    pub active: bool,
}

struct LedgerState {
    users: HashMap<UserId, UserRecord>,
    usage: HashMap<(UserId, Mode), u32>,
}

/// The authoritative in-memory access store: activation codes, issued users,
/// and per-(user, mode) usage counters. Sole decision-maker for admission.
///
/// All mutable state sits behind one mutex; `check_and_increment` runs as a
/// single critical section, so two concurrent requests can never both take
/// the last quota slot. Nothing is persisted — a restart forgets every user
/// and resets every counter.
pub struct AccessLedger {
    codes: HashSet<String>,
    limits: QuotaLimits,
    state: Mutex<LedgerState>,
}

impl AccessLedger {
    /// Build a ledger over a fixed activation-code set. The set is immutable
    /// for the ledger's lifetime; codes are shared secrets, not per-user.
    pub fn new(codes: impl IntoIterator<Item = String>, limits: QuotaLimits) -> Self {
        Self {
            codes: codes.into_iter().collect(),
            limits,
            state: Mutex::new(LedgerState {
                users: HashMap::new(),
                usage: HashMap::new(),
            }),
        }
    }

    /// Exchange an activation code for a fresh opaque user id.
    ///
    /// On an unknown code, fails with `InvalidActivationCode` and mutates
    /// nothing. Issued ids are never re-used within a process.
    pub fn activate(&self, code: &str) -> Result<UserId, LedgerError> {
        if !self.codes.contains(code) {
            return Err(LedgerError::InvalidActivationCode);
        }
        let user_id = new_user_id();
        let record = UserRecord {
            code_used: code.to_string(),
            activated_at: now_rfc3339(),
            active: true,
        };
        self.state.lock().users.insert(user_id.clone(), record);
        tracing::info!(user_id = %user_id, "activated new user");
        Ok(user_id)
    }

    /// True iff the id was issued by this ledger and has not been revoked.
    /// Pure lookup, no mutation.
    pub fn check_access(&self, user_id: &str) -> bool {
        self.state
            .lock()
            .users
            .get(user_id)
            .is_some_and(|u| u.active)
    }

    /// Mark a user inactive. Unknown ids are a silent no-op; revoke is
    /// forgiving and idempotent.
    pub fn revoke(&self, user_id: &str) {
        let mut state = self.state.lock();
        if let Some(user) = state.users.get_mut(user_id) {
            user.active = false;
            tracing::info!(user_id = %user_id, "revoked user");
        }
    }

    /// Check-and-increment in one critical section: lazily create the
    /// counter, deny without mutation at the ceiling, otherwise charge
    /// exactly one unit and admit.
    ///
    /// The quota is nominally monthly, but no rollover exists; counters run
    /// until the process exits.
    pub fn check_and_increment(&self, user_id: &str, mode: Mode) -> bool {
        let limit = self.limits.limit(mode);
        let mut state = self.state.lock();
        let counter = state
            .usage
            .entry((user_id.to_string(), mode))
            .or_insert(0);
        if *counter >= limit {
            tracing::debug!(user_id = %user_id, mode = %mode, limit, "quota exhausted");
            return false;
        }
        *counter += 1;
        true
    }

    /// Current counter for a (user, mode) pair. Zero if never charged.
    pub fn usage(&self, user_id: &str, mode: Mode) -> u32 {
        self.state
            .lock()
            .usage
            .get(&(user_id.to_string(), mode))
            .copied()
            .unwrap_or(0)
    }

    /// Number of users ever issued, revoked ones included.
    pub fn user_count(&self) -> usize {
        self.state.lock().users.len()
    }

    pub fn limits(&self) -> QuotaLimits {
        self.limits
    }
}

fn new_user_id() -> UserId {
    format!("usr_{}", ulid::Ulid::new().to_string().to_lowercase())
}

fn now_rfc3339() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}
