use restaurant_directory_api::api::AppState;
use restaurant_directory_api::config::{AppConfig, StorageBackend};
use restaurant_directory_api::storage::{DocumentStore, JsonlStore, MemoryStore, RestaurantStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Starting Restaurant Directory API");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Storage: {}", config.storage.backend);
    info!("   - Request timeout: {}s", config.server.request_timeout_secs);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize document store
    info!("💾 Initializing document store...");
    let store: Arc<dyn DocumentStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Jsonl => {
            let store = JsonlStore::open(&config.storage.data_dir).await?;
            info!("📂 Data directory: {:?}", store.dir());
            Arc::new(store)
        }
    };
    let restaurant_count = store.count_restaurants().await?;
    info!("✅ Document store ready ({} restaurants)", restaurant_count);

    let state = AppState::new(store);

    let app = restaurant_directory_api::with_request_timeout(
        restaurant_directory_api::app(state),
        Duration::from_secs(config.server.request_timeout_secs),
    );

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /health                      - Health check");
    info!("   POST   /restaurants                 - Create restaurant");
    info!("   GET    /restaurants                 - List restaurants");
    info!("   GET    /restaurants/:id             - Restaurant with comments");
    info!("   DELETE /restaurants/:id             - Delete restaurant");
    info!("   POST   /comments                    - Attach comment");
    info!("   GET    /restaurants/:id/comments    - Restaurant comments");
    info!("   GET    /restaurants/:id/tags|city|img-url");
    info!("   GET    /tags, /city, /img-url       - Distinct values");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
