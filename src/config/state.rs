// Application state module
// Immutable per-process state shared by every connection

use super::types::Config;
use crate::handler::{self, Router};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Routing table, built once at startup
    pub router: Router,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            router: handler::routes(),
        }
    }
}
