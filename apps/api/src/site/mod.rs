//! Page composition — the serve-time pass over the portfolio page.
//!
//! On every request the raw page is localized for the persisted language and
//! stamped with the persisted theme. When the translation table cannot be
//! loaded the page is still served, untranslated, with a single non-blocking
//! banner injected after `<body>` — the only mutation on that path.

pub mod handlers;

use crate::i18n::{apply_translations, Lang};
use crate::markup::{inject_after_body, set_class_text, set_root_attr};
use crate::models::translations::TranslationTable;
use crate::prefs::Theme;
use crate::render::escape_html;

pub const ERROR_BANNER_ID: &str = "data-error-banner";

/// CSS class of the element showing the theme-indicator glyph.
pub const THEME_ICON_CLASS: &str = "theme-icon";

pub fn compose_page(raw: &str, lang: Lang, table: &TranslationTable, theme: Theme) -> String {
    apply_theme(&apply_translations(raw, lang, table), theme)
}

/// Stamps the persisted theme onto the document root and its indicator.
pub fn apply_theme(html: &str, theme: Theme) -> String {
    let out = set_root_attr(html, "data-theme", theme.as_str());
    set_class_text(&out, THEME_ICON_CLASS, theme.icon())
}

/// Injects the data-failure banner. At most one banner per page, whatever
/// failed — repeated injection is a no-op.
pub fn inject_error_banner(html: &str, message: &str) -> String {
    if html.contains(ERROR_BANNER_ID) {
        return html.to_string();
    }
    let banner = format!(
        "<div id=\"{ERROR_BANNER_ID}\" style=\"position:fixed;top:0;left:0;right:0;\
         background:#fee2e2;color:#7f1d1d;padding:8px 12px;z-index:9999;text-align:center;\
         font-size:14px;\">{}</div>",
        escape_html(message)
    );
    inject_after_body(html, &banner)
}
