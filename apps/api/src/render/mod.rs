// CV template rendering.
// The renderer is a pure mapping from a ResumeRecord to an HTML fragment:
// identical input yields byte-identical output, with all presentation
// constants carried by CvStyle.

pub mod template;

pub use template::{render_cv, CvStyle};

/// Escapes text for safe interpolation into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
