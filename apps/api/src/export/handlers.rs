use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::export::export_cv;
use crate::state::AppState;

/// GET /api/v1/export/cv
/// Streams the converted CV back as an attachment download.
pub async fn handle_export_cv(State(state): State<AppState>) -> Result<Response, AppError> {
    let download = export_cv(
        &state.store,
        state.pdf.as_ref(),
        &state.export_gate,
        &state.cv_style,
    )
    .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.filename),
        ),
    ];
    Ok((headers, download.bytes).into_response())
}
