//! Markup migration — a one-shot utility, not a steady-state dependency.
//!
//! The authored `resume.json` is the single source of truth for the service.
//! When the page content has drifted ahead of the record, this utility
//! refreshes the record's `projects` and `experience` fields by scanning the
//! rendered markup for project and experience cards, preserving document
//! source order as array order. Invoked as:
//! `folio-api migrate <index.html> <resume.json>`

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use crate::models::resume::{ExperienceEntry, ProjectEntry, ResumeRecord};

const PROJECT_CARD_CLASS: &str = "project-card";
const EXPERIENCE_CARD_CLASS: &str = "detail-card";

/// Paragraphs starting with this marker list tooling, not achievements, and
/// are excluded from bullets.
const TECH_STACK_MARKER: &str = "Tech Stack:";

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// One project per card, heading text as title, paragraph text as details.
pub fn extract_projects(html: &str) -> Vec<ProjectEntry> {
    card_blocks(html, PROJECT_CARD_CLASS)
        .into_iter()
        .map(|block| ProjectEntry {
            title: first_heading(block, "h3").unwrap_or_default(),
            details: paragraphs(block),
        })
        .collect()
}

/// One experience entry per card, heading text as role, paragraph text as
/// bullets minus the tech-stack line. The cards carry no company or date.
pub fn extract_experience(html: &str) -> Vec<ExperienceEntry> {
    card_blocks(html, EXPERIENCE_CARD_CLASS)
        .into_iter()
        .map(|block| ExperienceEntry {
            role: first_heading(block, "h4").unwrap_or_default(),
            company: String::new(),
            date: None,
            bullets: paragraphs(block)
                .into_iter()
                .filter(|p| !p.starts_with(TECH_STACK_MARKER))
                .collect(),
        })
        .collect()
}

/// Slices the document into one block per card, in document order.
///
/// Cards are siblings inside a section, so each block runs from its opening
/// tag to the next card — or to the end of the enclosing section for the
/// last one, which keeps trailing page markup out of the final card.
fn card_blocks<'a>(html: &'a str, class: &str) -> Vec<&'a str> {
    let re = Regex::new(&format!(
        r#"<[A-Za-z][^>]*\bclass="[^"]*\b{}\b[^"]*"[^>]*>"#,
        regex::escape(class)
    ))
    .expect("valid regex");

    let starts: Vec<usize> = re.find_iter(html).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let section_end = html[start..]
                .find("</section>")
                .map(|o| start + o)
                .unwrap_or(html.len());
            let end = starts.get(i + 1).copied().unwrap_or(section_end).min(section_end);
            &html[start..end]
        })
        .collect()
}

fn first_heading(block: &str, tag: &str) -> Option<String> {
    let re = Regex::new(&format!(r"(?s)<{tag}\b[^>]*>(.*?)</{tag}>")).expect("valid regex");
    re.captures(block).map(|caps| text_content(&caps[1]))
}

fn paragraphs(block: &str) -> Vec<String> {
    let re = Regex::new(r"(?s)<p\b[^>]*>(.*?)</p>").expect("valid regex");
    re.captures_iter(block)
        .map(|caps| text_content(&caps[1]))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Visible text of a markup fragment: tags stripped, the common entities
/// decoded, whitespace collapsed.
fn text_content(fragment: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").expect("valid regex");
    let stripped = tag_re.replace_all(fragment, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// One-shot run
// ────────────────────────────────────────────────────────────────────────────

/// Reads the rendered markup, refreshes the authored record's `projects` and
/// `experience`, and writes it back pretty-printed. A missing record file
/// seeds a fresh one; a malformed record is an error, never overwritten.
pub async fn run(index_path: &Path, resume_path: &Path) -> Result<()> {
    let html = tokio::fs::read_to_string(index_path)
        .await
        .with_context(|| format!("failed to read {}", index_path.display()))?;

    let mut record: ResumeRecord = match tokio::fs::read_to_string(resume_path).await {
        Ok(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", resume_path.display()))?,
        Err(_) => ResumeRecord::default(),
    };

    record.projects = extract_projects(&html);
    record.experience = extract_experience(&html);

    let mut pretty = serde_json::to_string_pretty(&record)?;
    pretty.push('\n');
    tokio::fs::write(resume_path, pretty)
        .await
        .with_context(|| format!("failed to write {}", resume_path.display()))?;

    info!(
        "wrote {}: {} projects, {} experience entries",
        resume_path.display(),
        record.projects.len(),
        record.experience.len()
    );
    Ok(())
}
