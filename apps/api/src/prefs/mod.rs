//! Preference store — the two persisted scalars, `language` and `theme`.
//!
//! Stored in Redis under fixed keys, read with defaults when absent, and
//! written only by the toggle endpoints. Reads on the page path fall back to
//! defaults when the store is unreachable so a preference outage never takes
//! the page down; the explicit prefs API surfaces the failure instead.

pub mod handlers;

use std::fmt;

use redis::AsyncCommands;
use tracing::warn;

use crate::errors::AppError;
use crate::i18n::Lang;

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

// ────────────────────────────────────────────────────────────────────────────
// Theme
// ────────────────────────────────────────────────────────────────────────────

/// The supported themes. Closed set; `Light` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Indicator glyph: the mode the toggle switches TO.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PrefStore {
    redis: redis::Client,
}

impl PrefStore {
    pub fn new(redis: redis::Client) -> Self {
        Self { redis }
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        conn.get(key).await
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    /// Strict read for the prefs API. Unknown stored values count as absent.
    pub async fn language(&self) -> Result<Lang, AppError> {
        let raw = self.get_raw(LANGUAGE_KEY).await?;
        Ok(raw.as_deref().and_then(Lang::parse).unwrap_or_default())
    }

    pub async fn theme(&self) -> Result<Theme, AppError> {
        let raw = self.get_raw(THEME_KEY).await?;
        Ok(raw.as_deref().and_then(Theme::parse).unwrap_or_default())
    }

    /// Read with fallback for the page path: a store outage yields the
    /// default, logged, never an error.
    pub async fn language_or_default(&self) -> Lang {
        match self.language().await {
            Ok(lang) => lang,
            Err(e) => {
                warn!("preference store unreachable, defaulting language: {e}");
                Lang::default()
            }
        }
    }

    pub async fn theme_or_default(&self) -> Theme {
        match self.theme().await {
            Ok(theme) => theme,
            Err(e) => {
                warn!("preference store unreachable, defaulting theme: {e}");
                Theme::default()
            }
        }
    }

    pub async fn toggle_language(&self) -> Result<Lang, AppError> {
        let next = self.language().await?.toggled();
        self.set_raw(LANGUAGE_KEY, next.as_str()).await?;
        Ok(next)
    }

    pub async fn toggle_theme(&self) -> Result<Theme, AppError> {
        let next = self.theme().await?.toggled();
        self.set_raw(THEME_KEY, next.as_str()).await?;
        Ok(next)
    }
}
