use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::models::Record;

/// Application state shared across requests. Needs to be thread-safe.
#[derive(Debug, Default)]
pub struct AppState {
    /// In-memory record store keyed by record id.
    pub records: DashMap<Uuid, Record>,
}

impl AppState {
    pub fn new() -> Self {
        info!("Initializing application state");
        Self::default()
    }
}
