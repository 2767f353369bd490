use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Retention cap for the in-memory log. Oldest entries are dropped first.
const MAX_ENTRIES: usize = 10_000;

/// One client-reported usage event, stored as received. The mode is kept as
/// the raw string the client sent; telemetry is not validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEntry {
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub ts: String,
}

/// Best-effort usage log. Recording never fails from the caller's side;
/// anything noteworthy (drops at capacity) is traced instead.
#[derive(Default)]
pub struct TelemetryLog {
    entries: Mutex<Vec<TelemetryEntry>>,
}

impl TelemetryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: TelemetryEntry) {
        tracing::debug!(
            user_id = %entry.user_id,
            action = %entry.action,
            mode = entry.mode.as_deref().unwrap_or(""),
            "telemetry"
        );
        let mut entries = self.entries.lock();
        if entries.len() >= MAX_ENTRIES {
            tracing::warn!(cap = MAX_ENTRIES, "telemetry log full, dropping oldest entry");
            entries.remove(0);
        }
        entries.push(entry);
    }

    /// Snapshot of the log, oldest first. For internal diagnostics.
    pub fn entries(&self) -> Vec<TelemetryEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
