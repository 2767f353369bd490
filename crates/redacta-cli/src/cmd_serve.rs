use std::sync::Arc;
use std::time::Duration;

use redacta_core::{QuotaLimits, RelayConfig};
use redacta_ledger::AccessLedger;
use redacta_relay::AnthropicProvider;
use redacta_serve::ServeConfig;

const DEFAULT_PORT: u16 = 10000;

pub fn execute(
    bind: &str,
    port_flag: Option<u16>,
    model: Option<String>,
    max_tokens: Option<u32>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
) -> anyhow::Result<()> {
    // All environment reads happen here; nothing downstream touches env.
    let api_key = std::env::var("ANTHROPIC_API_KEY")
        .map_err(|_| anyhow::anyhow!("ANTHROPIC_API_KEY is not set; refusing to serve"))?;

    let port = match port_flag {
        Some(p) => p,
        None => match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port number: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        },
    };

    let codes: Vec<String> = std::env::var("REDACTA_CODES")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if codes.is_empty() {
        tracing::warn!("REDACTA_CODES is empty; every activation attempt will be rejected");
    }

    let mut relay_config = RelayConfig::new(api_key);
    if let Some(model) = model {
        relay_config = relay_config.with_model(model);
    }
    if let Some(max_tokens) = max_tokens {
        relay_config = relay_config.with_max_tokens(max_tokens);
    }
    if let Some(base_url) = base_url {
        relay_config = relay_config.with_base_url(base_url);
    }
    if let Some(secs) = timeout_secs {
        relay_config = relay_config.with_timeout(Duration::from_secs(secs));
    }

    let ledger = Arc::new(AccessLedger::new(codes, QuotaLimits::default()));
    let provider = Arc::new(AnthropicProvider::new(relay_config));
    let config = ServeConfig {
        bind: bind.to_string(),
        port,
    };

    tokio::runtime::Runtime::new()?.block_on(redacta_serve::serve(config, ledger, provider))
}
