//! Shared application state.

use std::sync::Arc;

use labsafe_inference::VisionBackend;
use storage::{ArtifactStore, ReportStore, UserStore};

/// State shared by all request handlers.
///
/// The vision backend is a trait object so tests and alternative
/// deployments can substitute the real client.
pub struct AppState {
    pub artifacts: ArtifactStore,
    pub users: UserStore,
    pub reports: ReportStore,
    pub backend: Arc<dyn VisionBackend>,
}

impl AppState {
    pub fn new(artifacts: ArtifactStore, backend: Arc<dyn VisionBackend>) -> Self {
        Self {
            artifacts,
            users: UserStore::new(),
            reports: ReportStore::new(),
            backend,
        }
    }
}
