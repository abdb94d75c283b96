use std::sync::Arc;

use crate::config::Config;
use crate::editor::DraftStore;
use crate::export::ExportService;
use crate::notices::NoticeBoard;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The editor's current draft. Also the snapshot source for draft exports.
    pub drafts: Arc<DraftStore>,
    /// Single exporter so the in-flight guard covers every export endpoint.
    pub exporter: Arc<ExportService>,
    pub notices: Arc<NoticeBoard>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let notices = Arc::new(NoticeBoard::new(config.notice_capacity));
        let exporter = Arc::new(ExportService::new(notices.clone()));
        let drafts = Arc::new(DraftStore::open(
            config.draft_cache_path.clone(),
            config.default_theme,
        ));
        Self {
            config,
            drafts,
            exporter,
            notices,
        }
    }
}
