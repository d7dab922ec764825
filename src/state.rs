//! Shared application state.

use std::sync::Arc;

use crate::application::services::{LinkService, LinkSettings};
use crate::domain::repositories::UrlRepository;
use crate::domain::task_coordinator::TaskCoordinator;
use crate::infrastructure::cache::CacheService;

/// State injected into every handler.
///
/// The repository, cache and coordinator are the same instances the link
/// service runs on; they are exposed directly for health checks and the
/// task drain middleware.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub tasks: TaskCoordinator,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        tasks: TaskCoordinator,
        settings: LinkSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            repository.clone(),
            cache.clone(),
            tasks.clone(),
            settings,
        ));

        Self {
            link_service,
            repository,
            cache,
            tasks,
        }
    }
}
