//! Translation tables — language-keyed nested dictionaries of UI strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full translation table: language code → nested object whose leaves
/// are strings, addressed by dot-separated key paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationTable(HashMap<String, Value>);

impl TranslationTable {
    /// Walks `path` (split on `.`) through the table for `lang`.
    /// Returns `None` for a missing language, a missing key at any depth,
    /// or a terminal value that is not a string.
    pub fn resolve(&self, lang: &str, path: &str) -> Option<&str> {
        let mut node = self.0.get(lang)?;
        for part in path.split('.') {
            node = node.as_object()?.get(part)?;
        }
        node.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TranslationTable {
        serde_json::from_str(
            r#"{
                "id": {"nav": {"home": "Beranda", "about": "Tentang"}, "hero": {"title": "Halo"}},
                "en": {"nav": {"home": "Home", "about": "About"}, "hero": {"title": "Hello"}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_nested_path() {
        let t = table();
        assert_eq!(t.resolve("id", "nav.home"), Some("Beranda"));
        assert_eq!(t.resolve("en", "hero.title"), Some("Hello"));
    }

    #[test]
    fn test_resolve_missing_language_or_key() {
        let t = table();
        assert_eq!(t.resolve("fr", "nav.home"), None);
        assert_eq!(t.resolve("en", "nav.missing"), None);
        assert_eq!(t.resolve("en", "nav.home.too.deep"), None);
    }

    #[test]
    fn test_resolve_non_string_terminal() {
        let t = table();
        // "nav" resolves to an object, not a string leaf.
        assert_eq!(t.resolve("en", "nav"), None);
    }

}
