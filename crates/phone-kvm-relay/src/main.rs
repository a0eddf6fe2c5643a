//! `phone-kvm-relay`: serve the clipboard relay until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use phone_kvm_relay::application::ContentStore;
use phone_kvm_relay::domain::{config::DEFAULT_BIND_ADDR, RelayConfig};
use phone_kvm_relay::infrastructure::run_server;

#[derive(Debug, Parser)]
#[command(name = "phone-kvm-relay", version, about = "In-memory clipboard relay for phone-kvm")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "PHONE_KVM_RELAY_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RelayConfig {
        bind_addr: cli.bind,
    };

    run_server(config, Arc::new(ContentStore::new()), async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("shutdown signal received"),
            Err(e) => warn!(error = %e, "could not listen for Ctrl+C; stopping"),
        }
    })
    .await
    .with_context(|| format!("serving relay on {}", cli.bind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_defaults_to_all_interfaces() {
        let cli = Cli::try_parse_from(["phone-kvm-relay"]).unwrap();
        assert_eq!(cli.bind, RelayConfig::default().bind_addr);
    }

    #[test]
    fn test_bind_rejects_non_socket_address() {
        assert!(Cli::try_parse_from(["phone-kvm-relay", "--bind", "localhost"]).is_err());
    }
}
