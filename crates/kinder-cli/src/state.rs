//! Application state

use crate::config::GatewayConfig;
use kinder_core::{ByAge, ById, SharedTree};
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    /// Gateway configuration
    pub config: GatewayConfig,
    /// Records ordered by age, unbalanced
    pub bst: Arc<SharedTree<ByAge>>,
    /// Records ordered by id, AVL balanced
    pub avl: Arc<SharedTree<ById>>,
}

impl AppState {
    /// Create a new application state with two empty trees
    pub fn new(config: GatewayConfig) -> Self {
        let bst = Arc::new(SharedTree::new(config.bst.clone()));
        let avl = Arc::new(SharedTree::new(config.avl.clone()));
        info!("Storage mode: in-memory (records are lost on shutdown)");

        Self { config, bst, avl }
    }
}
