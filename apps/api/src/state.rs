use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::content::ContentStore;
use crate::pdf_client::PdfRenderer;
use crate::prefs::PrefStore;
use crate::render::CvStyle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub prefs: PrefStore,
    /// Pluggable conversion engine. Default: the HTTP service; swap via PDF_RENDERER env.
    pub pdf: Arc<dyn PdfRenderer>,
    /// Presentation parameters of the CV template.
    pub cv_style: CvStyle,
    pub config: Config,
    /// Single-permit gate: at most one CV export in flight at a time.
    pub export_gate: Arc<Semaphore>,
}
