//! # idhub-keypair-api — Binary Entry Point
//!
//! Starts the identity hub management API with the in-memory key-pair
//! service. Configuration comes from the environment; see
//! [`idhub_keypair_api::config`].

use std::sync::Arc;

use idhub_core::KeyPairService;
use idhub_keypair_api::config::ManagementApiConfig;
use idhub_keypairs::InMemoryKeyPairService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ManagementApiConfig::from_env();
    let port = config.port();

    let key_pairs: Arc<dyn KeyPairService> = Arc::new(InMemoryKeyPairService::new());
    let app = idhub_keypair_api::app(config, key_pairs);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("identity hub management API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
