use std::sync::Arc;

use crate::services::Marketplace;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Arc<Marketplace>,
}

impl AppState {
    pub fn new(marketplace: Marketplace) -> Self {
        Self {
            marketplace: Arc::new(marketplace),
        }
    }
}
