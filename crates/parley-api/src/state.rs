//! Application state wiring the services together.
//!
//! The chat service is generic over the history store and inference engine
//! traits; AppState pins it to the concrete infra implementations.

use std::sync::Arc;

use parley_core::chat::ChatService;
use parley_infra::config::load_global_config;
use parley_infra::llm::HttpTextGenerator;
use parley_infra::sqlite::{DatabasePool, SqliteHistoryStore};

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteHistoryStore, HttpTextGenerator>;

/// Shared application state for the REST API and CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, load config,
    /// wire the chat service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = parley_infra::sqlite::pool::resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_global_config(&data_dir).await;

        let history = SqliteHistoryStore::new(db_pool.clone());
        let engine = HttpTextGenerator::new(&config.engine)
            .map_err(|e| anyhow::anyhow!("inference client init failed: {e}"))?;
        let chat_service = Arc::new(ChatService::new(history, engine, &config.chat));

        tracing::info!(
            data_dir = %data_dir.display(),
            engine = %config.engine.base_url,
            window = config.chat.window_size,
            "application state initialized"
        );

        Ok(Self {
            chat_service,
            db_pool,
        })
    }
}
