pub mod prompt;
pub mod provider;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use redacta_core::Mode;
use redacta_ledger::AccessLedger;

pub use provider::{AnthropicProvider, CompletionProvider, ProviderError};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("text must not be empty")]
    EmptyText,
    #[error("unknown or revoked user")]
    Unauthorized,
    #[error("quota exceeded for this mode")]
    QuotaExceeded,
    #[error("completion provider failed")]
    Upstream(#[source] ProviderError),
}

/// Turns an admitted (text, mode, user) triple into a rendered instruction,
/// one provider call, and a mapped result. Holds no state of its own; all
/// admission decisions belong to the ledger.
pub struct Relay {
    ledger: Arc<AccessLedger>,
    provider: Arc<dyn CompletionProvider>,
}

impl Relay {
    pub fn new(ledger: Arc<AccessLedger>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { ledger, provider }
    }

    /// Preconditions run in order and short-circuit: non-empty text, known
    /// active user, then the atomic quota check-and-increment. The counter
    /// commits strictly before the outbound call, and an upstream failure
    /// does not refund it — quota charges on attempt, not on success.
    pub async fn translate(
        &self,
        text: &str,
        mode: Mode,
        user_id: &str,
    ) -> Result<String, RelayError> {
        if text.trim().is_empty() {
            return Err(RelayError::EmptyText);
        }
        if !self.ledger.check_access(user_id) {
            return Err(RelayError::Unauthorized);
        }
        if !self.ledger.check_and_increment(user_id, mode) {
            return Err(RelayError::QuotaExceeded);
        }

        let rendered = prompt::render(mode, text);
        match self.provider.complete(&rendered).await {
            Ok(generated) => Ok(generated),
            Err(err) => {
                // Detail stays server-side; clients only see a generic failure.
                warn!(user_id = %user_id, mode = %mode, error = %err, "upstream completion failed");
                Err(RelayError::Upstream(err))
            }
        }
    }
}
