use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use crate::content::{RESUME_FILE, TRANSLATIONS_FILE};
use crate::errors::AppError;
use crate::site::{apply_theme, compose_page, inject_error_banner};
use crate::state::AppState;

/// GET /
/// Serves the portfolio page, localized for the persisted language and
/// stamped with the persisted theme. A translation failure downgrades to the
/// raw page plus the error banner; it never takes the page down.
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.site_dir.join("index.html");
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| AppError::Data(format!("failed to read {}: {e}", path.display())))?;

    let lang = state.prefs.language_or_default().await;
    let theme = state.prefs.theme_or_default().await;

    let page = match state.store.load_translations().await {
        Ok(table) => compose_page(&raw, lang, &table, theme),
        Err(e) => {
            tracing::error!("failed to load translations: {e}");
            inject_error_banner(
                &apply_theme(&raw, theme),
                "Could not load translations; showing default text.",
            )
        }
    };
    Ok(Html(page))
}

/// GET /resume.json
pub async fn handle_resume_json(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_data_file(&state, RESUME_FILE).await
}

/// GET /translations.json
pub async fn handle_translations_json(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    serve_data_file(&state, TRANSLATIONS_FILE).await
}

/// The data sources are never cached: every fetch sees the file as it is on
/// disk right now.
async fn serve_data_file(state: &AppState, file_name: &str) -> Result<Response, AppError> {
    let body = state.store.read_raw(file_name).await?;
    let headers = [
        (header::CONTENT_TYPE, "application/json"),
        (header::CACHE_CONTROL, "no-store"),
    ];
    Ok((headers, body).into_response())
}
