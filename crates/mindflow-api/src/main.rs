use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mindflow_api::{build_router, config::Config, state::AppState};
use mindflow_persist::{InMemoryStore, PersistClientBuilder, ThreadStore};
use mindflow_tools::ResourceSearch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting MindFlow API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let threads = connect_store(&config).await?;

    let search = ResourceSearch::from_api_key(config.search_api_key());
    if search.is_live() {
        tracing::info!("Wellness resource search: Brave Search with curated fallback");
    } else {
        tracing::info!("Wellness resource search: curated resources only");
    }

    let state = Arc::new(AppState::new(config.clone(), threads, search));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("MCP endpoint: http://{}/mcp", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ThreadStore>> {
    if config.uses_memory_store() {
        tracing::warn!("Using in-memory store; threads are lost on restart");
        return Ok(Arc::new(InMemoryStore::new()));
    }

    tracing::info!("Connecting to MongoDB");
    let client = PersistClientBuilder::new()
        .mongodb_uri(&config.mongodb_uri)
        .database(&config.mongodb.database)
        .pool_size(config.mongodb.pool_size)
        .timeout(config.mongodb.timeout())
        .ensure_indexes(true)
        .build()
        .await?;
    client.ping().await?;

    tracing::info!("MongoDB connected (database: {})", client.pool().database_name());
    Ok(Arc::new(client))
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        }
        _ => {
            registry.with(tracing_subscriber::fmt::layer().pretty()).init();
        }
    }
}
