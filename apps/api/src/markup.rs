//! Tag surgery over served page markup.
//!
//! The page is transformed as text, not as a parsed tree: the elements these
//! helpers touch (root tag attributes, single-class indicator elements,
//! i18n-tagged leaf elements) are all addressable with a tag-level scan, and
//! the transforms must never fail the page — a pattern that does not match
//! simply leaves the markup unchanged.

use std::sync::OnceLock;

use regex::Regex;

fn root_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<html\b[^>]*>").expect("valid regex"))
}

fn body_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<body\b[^>]*>").expect("valid regex"))
}

/// Returns the end offset of the text run starting at `from`: the visible
/// text of a leaf element extends to the next tag boundary.
pub fn text_run_end(html: &str, from: usize) -> usize {
    html[from..].find('<').map(|i| from + i).unwrap_or(html.len())
}

/// Sets (or inserts) an attribute on the document's `<html>` tag.
/// Without a root tag the markup is returned unchanged.
pub fn set_root_attr(html: &str, attr: &str, value: &str) -> String {
    let Some(m) = root_tag_re().find(html) else {
        return html.to_string();
    };
    let tag = m.as_str();
    let attr_re = Regex::new(&format!(r#"\b{}="[^"]*""#, regex::escape(attr))).expect("valid regex");
    let new_tag = if attr_re.is_match(tag) {
        attr_re
            .replace(tag, format!(r#"{attr}="{value}""#).as_str())
            .into_owned()
    } else {
        // Insert just before the closing '>'.
        format!(r#"{} {}="{}">"#, &tag[..tag.len() - 1], attr, value)
    };
    format!("{}{}{}", &html[..m.start()], new_tag, &html[m.end()..])
}

/// Replaces the text content of the first element carrying `class`.
/// Leaf elements only: the replacement spans up to the next tag boundary.
pub fn set_class_text(html: &str, class: &str, text: &str) -> String {
    let re = Regex::new(&format!(
        r#"<[A-Za-z][^>]*\bclass="[^"]*\b{}\b[^"]*"[^>]*>"#,
        regex::escape(class)
    ))
    .expect("valid regex");
    let Some(m) = re.find(html) else {
        return html.to_string();
    };
    let end = text_run_end(html, m.end());
    format!("{}{}{}", &html[..m.end()], text, &html[end..])
}

/// Inserts `fragment` immediately after the opening `<body>` tag, or at the
/// top of the document when there is none.
pub fn inject_after_body(html: &str, fragment: &str) -> String {
    match body_tag_re().find(html) {
        Some(m) => format!("{}{}{}", &html[..m.end()], fragment, &html[m.end()..]),
        None => format!("{fragment}{html}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_root_attr_inserts_when_absent() {
        let html = r#"<html><body></body></html>"#;
        let out = set_root_attr(html, "lang", "en");
        assert!(out.starts_with(r#"<html lang="en">"#));
    }

    #[test]
    fn test_set_root_attr_replaces_existing_value() {
        let html = r#"<html lang="id" data-theme="light"><body></body></html>"#;
        let out = set_root_attr(html, "lang", "en");
        assert!(out.contains(r#"lang="en""#));
        assert!(!out.contains(r#"lang="id""#));
        assert!(out.contains(r#"data-theme="light""#));
    }

    #[test]
    fn test_set_root_attr_without_root_tag_is_noop() {
        let html = "<div>fragment</div>";
        assert_eq!(set_root_attr(html, "lang", "en"), html);
    }

    #[test]
    fn test_set_class_text_replaces_first_match_only() {
        let html = r#"<span class="lang-icon">X</span><span class="lang-icon">Y</span>"#;
        let out = set_class_text(html, "lang-icon", "Z");
        assert!(out.contains(r#"<span class="lang-icon">Z</span>"#));
        assert!(out.contains(">Y</span>"));
    }

    #[test]
    fn test_set_class_text_does_not_match_class_substring() {
        let html = r#"<span class="slang-icons">X</span>"#;
        assert_eq!(set_class_text(html, "lang-icon", "Z"), html);
    }

    #[test]
    fn test_inject_after_body() {
        let html = r#"<html><body class="page"><p>hi</p></body></html>"#;
        let out = inject_after_body(html, "<div id=\"b\"></div>");
        assert!(out.contains(r#"<body class="page"><div id="b"></div><p>hi</p>"#));
    }

    #[test]
    fn test_inject_without_body_prepends() {
        let out = inject_after_body("<p>hi</p>", "<div></div>");
        assert!(out.starts_with("<div></div>"));
    }
}
