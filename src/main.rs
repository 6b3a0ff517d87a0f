use group_registry::config::ServerConfig;
use group_registry::routes::{Services, build_router};
use group_registry::storage::FileBackend;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging:
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("group_registry=info")),
        )
        .init();

    // 2. Configuration (defaults, then environment, then flags):
    let config = ServerConfig::from_env_and_args()?;

    if !config.data_dir.is_dir() {
        anyhow::bail!(
            "data directory {} does not exist",
            config.data_dir.display()
        );
    }
    tracing::info!("Serving documents from {}", config.data_dir.display());

    // 3. Storage layer and HTTP router:
    let backend = Arc::new(FileBackend::new(config.data_dir.clone()));
    let app = build_router(Services::new(backend));

    // 4. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("App listening at {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
