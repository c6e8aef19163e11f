use crate::config::Config;
use crate::content::ContentStore;
use crate::flow::FlowController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub flow: FlowController,
    /// Same store the flow controller reads; the admin screen edits it.
    pub store: ContentStore,
    pub config: Config,
}
