pub mod ledger;
pub mod telemetry;

pub use ledger::{AccessLedger, LedgerError, UserRecord};
pub use telemetry::{TelemetryEntry, TelemetryLog};
