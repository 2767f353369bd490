use serde::{Deserialize, Serialize};

/// User ID format: `usr_<ulid>`
pub type UserId = String;

/// Request category: selects the instruction template and the quota bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Short daily log entry (the cheap default).
    Bitacola,
    /// Long-form formal report.
    Informe,
}

impl Mode {
    /// Parse a client-supplied mode string. Anything other than `"informe"`
    /// (including absent input) falls back to `Bitacola` — ambiguous requests
    /// are billed against the cheaper bucket.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("informe") => Mode::Informe,
            _ => Mode::Bitacola,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bitacola => "bitacola",
            Mode::Informe => "informe",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-mode monthly request ceilings. Fixed at construction, never mutated at
/// runtime. The monthly rollover itself is not implemented: counters run for
/// the lifetime of the process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuotaLimits {
    pub bitacola: u32,
    pub informe: u32,
}

impl QuotaLimits {
    pub fn limit(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Bitacola => self.bitacola,
            Mode::Informe => self.informe,
        }
    }
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            bitacola: 100,
            informe: 10,
        }
    }
}
