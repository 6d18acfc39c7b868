use std::sync::Arc;

use mindflow_persist::ThreadStore;
use mindflow_tools::ResourceSearch;

use crate::config::Config;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub threads: Arc<dyn ThreadStore>,
    pub search: Arc<ResourceSearch>,
}

impl AppState {
    pub fn new(config: Config, threads: Arc<dyn ThreadStore>, search: ResourceSearch) -> Self {
        Self {
            config: Arc::new(config),
            threads,
            search: Arc::new(search),
        }
    }
}
