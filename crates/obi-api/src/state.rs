//! Shared application state.

use std::sync::Arc;

use obi_vc::{ContextStore, DocumentLoader};

use crate::config::AppConfig;
use crate::db::{MemoryStore, Store};

/// State shared by all handlers. Cheap to clone; everything heavy is
/// behind an `Arc` or a pool.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub loader: Arc<DocumentLoader>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state around an initialized store.
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self {
            store,
            loader: Arc::new(DocumentLoader::new(ContextStore::bundled())),
            config: Arc::new(config),
        }
    }

    /// In-memory state with default configuration, for tests and local
    /// development.
    pub fn in_memory() -> (Self, MemoryStore) {
        let memory = MemoryStore::new();
        let state = Self::new(Store::Memory(memory.clone()), AppConfig::default());
        (state, memory)
    }
}
