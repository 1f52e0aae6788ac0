//! Internationalization — applies a language's translation table to the
//! served page markup.
//!
//! Elements opt in with a `data-i18n="section.key"` attribute; the key is a
//! dot-path into the nested table. A miss (unknown language, unknown key,
//! non-string terminal) is logged and leaves that element untouched —
//! translation never fails the page. After all elements are processed the
//! document `lang` attribute and the `.lang-icon` indicator are updated.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::markup::{set_class_text, set_root_attr, text_run_end};
use crate::models::translations::TranslationTable;
use crate::render::escape_html;

/// CSS class of the element showing the language-indicator glyph.
pub const LANG_ICON_CLASS: &str = "lang-icon";

// ────────────────────────────────────────────────────────────────────────────
// Language codes
// ────────────────────────────────────────────────────────────────────────────

/// The supported language codes. Closed set; `Id` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Id,
    En,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Id => "id",
            Lang::En => "en",
        }
    }

    pub fn parse(s: &str) -> Option<Lang> {
        match s {
            "id" => Some(Lang::Id),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn toggled(self) -> Lang {
        match self {
            Lang::Id => Lang::En,
            Lang::En => Lang::Id,
        }
    }

    /// Indicator glyph: the flag of the language the toggle switches TO.
    pub fn icon(self) -> &'static str {
        match self {
            Lang::Id => "🇬🇧",
            Lang::En => "🇮🇩",
        }
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang::Id
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Translation application
// ────────────────────────────────────────────────────────────────────────────

fn i18n_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<[A-Za-z][^>]*\bdata-i18n="([^"]*)"[^>]*>"#).expect("valid regex")
    })
}

/// Applies the table for `lang` to every `data-i18n`-tagged element in the
/// page, then sets the document language attribute and the indicator glyph.
///
/// Tagged elements must be leaves: the replaced text run extends to the next
/// tag boundary. Re-applying the same language is a no-op with respect to
/// the final text.
pub fn apply_translations(html: &str, lang: Lang, table: &TranslationTable) -> String {
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    for caps in i18n_attr_re().captures_iter(html) {
        let tag = caps.get(0).expect("whole match");
        let key = &caps[1];
        out.push_str(&html[cursor..tag.end()]);
        let text_end = text_run_end(html, tag.end());

        match table.resolve(lang.as_str(), key) {
            Some(value) => out.push_str(&escape_html(value)),
            None => {
                warn!("translation key not found: {}.{}", lang, key);
                out.push_str(&html[tag.end()..text_end]);
            }
        }
        cursor = text_end;
    }
    out.push_str(&html[cursor..]);

    let out = set_root_attr(&out, "lang", lang.as_str());
    set_class_text(&out, LANG_ICON_CLASS, lang.icon())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TranslationTable {
        serde_json::from_str(
            r#"{
                "id": {"nav": {"home": "Beranda"}, "hero": {"title": "Halo & Selamat"}},
                "en": {"nav": {"home": "Home"}, "hero": {"title": "Hello & Welcome"}}
            }"#,
        )
        .unwrap()
    }

    const PAGE: &str = concat!(
        r#"<html lang="id"><body>"#,
        r#"<a data-i18n="nav.home">Beranda</a>"#,
        r#"<h1 data-i18n="hero.title">Halo</h1>"#,
        r#"<p data-i18n="nav.missing">untouched</p>"#,
        r#"<span class="lang-icon">🇬🇧</span>"#,
        r#"</body></html>"#,
    );

    #[test]
    fn test_applies_resolved_keys_and_escapes() {
        let out = apply_translations(PAGE, Lang::En, &table());
        assert!(out.contains(r#"<a data-i18n="nav.home">Home</a>"#));
        assert!(out.contains(r#"<h1 data-i18n="hero.title">Hello &amp; Welcome</h1>"#));
    }

    #[test]
    fn test_missing_key_leaves_element_and_siblings_intact() {
        let out = apply_translations(PAGE, Lang::En, &table());
        assert!(out.contains(r#"<p data-i18n="nav.missing">untouched</p>"#));
        // Siblings after the miss are still processed.
        assert!(out.contains(">Home</a>"));
    }

    #[test]
    fn test_missing_language_leaves_all_elements() {
        let empty: TranslationTable = serde_json::from_str("{}").unwrap();
        let out = apply_translations(PAGE, Lang::En, &empty);
        assert!(out.contains(">Beranda</a>"));
        assert!(out.contains(">untouched</p>"));
        // The language attribute and icon are still updated.
        assert!(out.contains(r#"lang="en""#));
    }

    #[test]
    fn test_sets_document_lang_and_icon() {
        let out = apply_translations(PAGE, Lang::En, &table());
        assert!(out.contains(r#"<html lang="en">"#));
        assert!(out.contains(r#"<span class="lang-icon">🇮🇩</span>"#));
    }

    #[test]
    fn test_idempotent_per_language() {
        let once = apply_translations(PAGE, Lang::En, &table());
        let twice = apply_translations(&once, Lang::En, &table());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_lang_parse_toggle_icon() {
        assert_eq!(Lang::parse("id"), Some(Lang::Id));
        assert_eq!(Lang::parse("en"), Some(Lang::En));
        assert_eq!(Lang::parse("fr"), None);
        assert_eq!(Lang::Id.toggled(), Lang::En);
        assert_eq!(Lang::En.toggled(), Lang::Id);
        assert_eq!(Lang::default(), Lang::Id);
        assert_eq!(Lang::Id.icon(), "🇬🇧");
        assert_eq!(Lang::En.icon(), "🇮🇩");
    }
}
