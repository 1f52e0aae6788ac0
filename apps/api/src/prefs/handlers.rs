use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::i18n::Lang;
use crate::prefs::Theme;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PrefsResponse {
    pub language: &'static str,
    pub language_icon: &'static str,
    pub theme: &'static str,
    pub theme_icon: &'static str,
}

impl PrefsResponse {
    fn new(lang: Lang, theme: Theme) -> Self {
        Self {
            language: lang.as_str(),
            language_icon: lang.icon(),
            theme: theme.as_str(),
            theme_icon: theme.icon(),
        }
    }
}

/// GET /api/v1/prefs
pub async fn handle_get_prefs(
    State(state): State<AppState>,
) -> Result<Json<PrefsResponse>, AppError> {
    let lang = state.prefs.language().await?;
    let theme = state.prefs.theme().await?;
    Ok(Json(PrefsResponse::new(lang, theme)))
}

/// POST /api/v1/prefs/language
/// Flips the persisted language and returns the new preference state.
pub async fn handle_toggle_language(
    State(state): State<AppState>,
) -> Result<Json<PrefsResponse>, AppError> {
    let lang = state.prefs.toggle_language().await?;
    let theme = state.prefs.theme().await?;
    Ok(Json(PrefsResponse::new(lang, theme)))
}

/// POST /api/v1/prefs/theme
pub async fn handle_toggle_theme(
    State(state): State<AppState>,
) -> Result<Json<PrefsResponse>, AppError> {
    let theme = state.prefs.toggle_theme().await?;
    let lang = state.prefs.language().await?;
    Ok(Json(PrefsResponse::new(lang, theme)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefs_response_shape() {
        let json =
            serde_json::to_value(PrefsResponse::new(Lang::Id, Theme::Dark)).unwrap();
        assert_eq!(json["language"], "id");
        assert_eq!(json["language_icon"], "🇬🇧");
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["theme_icon"], "☀️");
    }
}
