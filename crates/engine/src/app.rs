//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::{AppConfig, ConfigError, StoreBackend},
    file_store::JsonFileStore,
    memory_store::InMemoryStore,
    ports::{ClockPort, KeyValueStore, RandomPort},
};
use crate::use_cases::{SelectionEngine, SessionController};

/// Main application state.
///
/// Owns the store, the selection engine built over it, and the session that
/// drives the engine.
pub struct App {
    pub store: Arc<dyn KeyValueStore>,
    pub engine: Arc<SelectionEngine>,
    pub session: SessionController,
}

impl App {
    /// Wire an application from already-built parts.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        catalog: wordday_domain::WordCatalog,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let engine = Arc::new(SelectionEngine::new(
            store.clone(),
            Arc::new(catalog),
            clock,
            random,
        ));
        let session = SessionController::new(engine.clone());
        Self {
            store,
            engine,
            session,
        }
    }

    /// Build the store and catalog described by `config` and wire them with
    /// the system clock and random source.
    pub async fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let store: Arc<dyn KeyValueStore> = match config.store {
            StoreBackend::File => {
                tracing::info!(path = %config.data_path.display(), "Using file store");
                Arc::new(JsonFileStore::open(config.data_path.clone()).await)
            }
            StoreBackend::Memory => {
                tracing::info!("Using in-memory store; nothing will be kept after exit");
                Arc::new(InMemoryStore::new())
            }
        };
        let catalog = config.load_catalog().await?;

        Ok(Self::new(
            store,
            catalog,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        ))
    }
}
