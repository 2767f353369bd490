mod cmd_serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "redacta", version, about = "Quota-gated Catalan report relay")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP relay server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
        /// Port to listen on (overrides the PORT environment variable)
        #[arg(long)]
        port: Option<u16>,
        /// Model identifier sent to the completion provider
        #[arg(long)]
        model: Option<String>,
        /// Completion length cap, in provider tokens
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Base URL of the completion endpoint
        #[arg(long)]
        base_url: Option<String>,
        /// Timeout for the outbound completion call, in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve {
            bind,
            port,
            model,
            max_tokens,
            base_url,
            timeout_secs,
        } => cmd_serve::execute(&bind, port, model, max_tokens, base_url, timeout_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_provider_flags_parse() {
        let cli = Cli::try_parse_from([
            "redacta",
            "serve",
            "--port",
            "8080",
            "--model",
            "claude-test",
            "--max-tokens",
            "500",
            "--base-url",
            "https://example.test",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        let Command::Serve {
            bind,
            port,
            model,
            max_tokens,
            base_url,
            timeout_secs,
        } = cli.cmd;
        assert_eq!(bind, "0.0.0.0");
        assert_eq!(port, Some(8080));
        assert_eq!(model.as_deref(), Some("claude-test"));
        assert_eq!(max_tokens, Some(500));
        assert_eq!(base_url.as_deref(), Some("https://example.test"));
        assert_eq!(timeout_secs, Some(30));
    }

    #[test]
    fn serve_flags_all_default_to_none() {
        let cli = Cli::try_parse_from(["redacta", "serve"]).unwrap();
        let Command::Serve {
            port,
            model,
            max_tokens,
            base_url,
            timeout_secs,
            ..
        } = cli.cmd;
        assert_eq!(port, None);
        assert_eq!(model, None);
        assert_eq!(max_tokens, None);
        assert_eq!(base_url, None);
        assert_eq!(timeout_secs, None);
    }
}
