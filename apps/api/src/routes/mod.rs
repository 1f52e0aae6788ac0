pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::export;
use crate::prefs;
use crate::site;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.site_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        // The page and its data sources
        .route("/", get(site::handlers::handle_index))
        .route("/resume.json", get(site::handlers::handle_resume_json))
        .route(
            "/translations.json",
            get(site::handlers::handle_translations_json),
        )
        // CV export
        .route("/api/v1/export/cv", get(export::handlers::handle_export_cv))
        // Preferences
        .route("/api/v1/prefs", get(prefs::handlers::handle_get_prefs))
        .route(
            "/api/v1/prefs/language",
            post(prefs::handlers::handle_toggle_language),
        )
        .route(
            "/api/v1/prefs/theme",
            post(prefs::handlers::handle_toggle_theme),
        )
        // Everything else is a static site asset
        .fallback_service(assets)
        .with_state(state)
}
