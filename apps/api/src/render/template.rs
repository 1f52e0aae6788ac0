//! The CV template — one configurable template, not competing variants.
//!
//! Contract: the fragment contains every list entry of the record in fixed
//! section order (header/contact, profile, skills, experience, projects,
//! education, certifications), each ordered sequence in source order and the
//! skills mapping in insertion order. Missing optional sub-fields render
//! their container with zero child items. All record text is escaped before
//! interpolation.

use crate::models::resume::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord,
};
use crate::render::escape_html;

/// Break policy for the paged output: headings keep their following block,
/// lists and paragraphs are never split mid-element.
const PAGE_BREAK_CSS: &str = "\
* { box-sizing: border-box; }\n\
h2, h3 { page-break-after: avoid; }\n\
ul, p { page-break-inside: avoid; break-inside: avoid; }\n\
.no-break, .cv-section { page-break-inside: avoid; break-inside: avoid; }\n";

// ────────────────────────────────────────────────────────────────────────────
// Style parameters
// ────────────────────────────────────────────────────────────────────────────

/// Presentation parameters of the template. Not part of the structural
/// contract — swapping these produces a different look, never different data.
#[derive(Debug, Clone)]
pub struct CvStyle {
    pub font_stack: String,
    /// Physical content width; matched to the export page size.
    pub page_width_mm: u16,
    /// Inner padding in inches (the export itself uses zero outer margin).
    pub pad_in: f32,
    pub ink: String,
    pub muted: String,
    pub faint: String,
    pub header_bg: String,
    pub header_fg: String,
    pub border: String,
}

impl Default for CvStyle {
    fn default() -> Self {
        CvStyle {
            font_stack: "Inter, Arial, sans-serif".to_string(),
            page_width_mm: 210,
            pad_in: 0.3,
            ink: "#0f172a".to_string(),
            muted: "#334155".to_string(),
            faint: "#475569".to_string(),
            header_bg: "#0f172a".to_string(),
            header_fg: "#ffffff".to_string(),
            border: "#e6eef3".to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

/// Renders the record to a single HTML fragment.
pub fn render_cv(record: &ResumeRecord, style: &CvStyle) -> String {
    let mut out = String::with_capacity(8 * 1024);

    out.push_str(&format!(
        "<div style=\"font-family:{}; width:{}mm; margin:0 auto; color:{}; \
         font-size:15px; box-sizing:border-box; padding:{}in;\">",
        style.font_stack, style.page_width_mm, style.ink, style.pad_in
    ));
    out.push_str(&format!("<style>{PAGE_BREAK_CSS}</style>"));

    push_header(&mut out, record, style);

    out.push_str(&format!(
        "<div style=\"display:flex; gap:12px; border:1px solid {}; border-top:none; \
         padding:12px 14px; background:#fff; border-radius:0 0 8px 8px;\">",
        style.border
    ));

    // Left column: profile and skills.
    out.push_str("<div style=\"flex:0 0 30%; padding:8px 10px;\">");
    push_profile(&mut out, record);
    push_skills(&mut out, record, style);
    out.push_str("</div>");

    // Right column: experience, projects, education, certifications.
    out.push_str("<div style=\"flex:1; padding:8px 8px;\">");
    push_experience(&mut out, record, style);
    push_projects(&mut out, record, style);
    push_education(&mut out, record, style);
    push_certifications(&mut out, record, style);
    out.push_str("</div>");

    out.push_str("</div></div>");
    out
}

fn heading(out: &mut String, label: &str) {
    out.push_str(&format!(
        "<h3 style=\"margin:8px 0 6px 0; font-size:13px; letter-spacing:0.6px;\">{label}</h3>"
    ));
}

fn push_header(out: &mut String, record: &ResumeRecord, style: &CvStyle) {
    out.push_str(&format!(
        "<div class=\"cv-header\" style=\"background:{}; color:{}; padding:12px 14px; \
         border-radius:8px 8px 0 0; display:flex; justify-content:space-between; \
         align-items:center;\">",
        style.header_bg, style.header_fg
    ));
    out.push_str(&format!(
        "<div style=\"flex:1\"><h1 style=\"margin:0; font-size:28px; font-weight:700;\">{}</h1></div>",
        escape_html(&record.name)
    ));
    out.push_str(
        "<div style=\"text-align:right; font-size:13px; line-height:1.35; min-width:200px;\">",
    );
    for line in [
        &record.contact.email,
        &record.contact.phone,
        &record.contact.location,
    ] {
        out.push_str(&format!(
            "<div style=\"margin-top:2px;\">{}</div>",
            escape_html(line)
        ));
    }
    out.push_str("</div></div>");
}

fn push_profile(out: &mut String, record: &ResumeRecord) {
    out.push_str("<div class=\"cv-section cv-profile\">");
    heading(out, "Profile");
    out.push_str(&format!(
        "<p style=\"margin:0 0 8px 0; font-size:14.8px; line-height:1.32;\">{}</p>",
        escape_html(&record.profile)
    ));
    out.push_str("</div>");
}

fn push_skills(out: &mut String, record: &ResumeRecord, style: &CvStyle) {
    out.push_str("<div class=\"cv-section cv-skills\">");
    heading(out, "Skills");
    for (category, skills) in record.skills_overview.iter() {
        let list = skills
            .iter()
            .map(|s| escape_html(s))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "<p style=\"margin:2px 0; font-size:13.2px;\"><strong style=\"font-weight:600;\">{}</strong>\
             <br><span style=\"color:{};\">{}</span></p>",
            escape_html(category),
            style.muted,
            list
        ));
    }
    out.push_str("</div>");
}

fn push_experience(out: &mut String, record: &ResumeRecord, style: &CvStyle) {
    out.push_str("<div class=\"cv-section\">");
    heading(out, "Experience");
    for entry in &record.experience {
        push_experience_entry(out, entry, style);
    }
    out.push_str("</div>");
}

fn push_experience_entry(out: &mut String, entry: &ExperienceEntry, style: &CvStyle) {
    out.push_str("<div class=\"cv-experience\" style=\"margin-bottom:8px;\">");
    out.push_str(&format!(
        "<div style=\"display:flex; justify-content:space-between; align-items:flex-start;\">\
         <div style=\"font-weight:700; font-size:14px;\">{}</div>\
         <div style=\"font-size:12.5px; color:{};\">{}</div></div>",
        escape_html(&entry.role),
        style.faint,
        escape_html(entry.date.as_deref().unwrap_or_default())
    ));
    out.push_str(&format!(
        "<div style=\"font-size:13.5px; color:{}; margin:4px 0 6px 0;\">{}</div>",
        style.muted,
        escape_html(&entry.company)
    ));
    out.push_str("<ul style=\"margin:0 0 6px 16px; font-size:13.5px;\">");
    for bullet in &entry.bullets {
        out.push_str(&format!(
            "<li style=\"margin-bottom:4px; line-height:1.3;\">{}</li>",
            escape_html(bullet)
        ));
    }
    out.push_str("</ul></div>");
}

fn push_projects(out: &mut String, record: &ResumeRecord, style: &CvStyle) {
    out.push_str("<div class=\"cv-section\">");
    heading(out, "Projects");
    for project in &record.projects {
        push_project_entry(out, project, style);
    }
    out.push_str("</div>");
}

fn push_project_entry(out: &mut String, project: &ProjectEntry, style: &CvStyle) {
    out.push_str("<div class=\"cv-project\" style=\"margin-bottom:8px;\">");
    out.push_str(&format!(
        "<div style=\"font-weight:600; font-size:14.5px;\">{}</div>",
        escape_html(&project.title)
    ));
    for detail in &project.details {
        out.push_str(&format!(
            "<div class=\"cv-project-detail\" style=\"font-size:13.5px; color:{}; margin:4px 0;\">• {}</div>",
            style.muted,
            escape_html(detail)
        ));
    }
    out.push_str("</div>");
}

fn push_education(out: &mut String, record: &ResumeRecord, style: &CvStyle) {
    out.push_str("<div class=\"cv-section\">");
    heading(out, "Education");
    for entry in &record.education {
        push_education_entry(out, entry, style);
    }
    out.push_str("</div>");
}

fn push_education_entry(out: &mut String, entry: &EducationEntry, style: &CvStyle) {
    out.push_str(&format!(
        "<div class=\"cv-education\" style=\"font-size:13.5px; color:{}; margin-bottom:6px;\">\
         <strong>{}</strong><br>{} ({}) — GPA {}</div>",
        style.muted,
        escape_html(&entry.school),
        escape_html(&entry.degree),
        escape_html(&entry.year.to_string()),
        escape_html(&entry.gpa.to_string())
    ));
}

fn push_certifications(out: &mut String, record: &ResumeRecord, style: &CvStyle) {
    out.push_str("<div class=\"cv-section\">");
    heading(out, "Certifications");
    out.push_str(&format!(
        "<ul class=\"cv-certifications\" style=\"margin:4px 0 0 18px; padding:0; font-size:13px; color:{};\">",
        style.muted
    ));
    for cert in &record.certifications {
        out.push_str(&format!(
            "<li style=\"margin-bottom:4px;\">{}</li>",
            escape_html(cert)
        ));
    }
    out.push_str("</ul></div>");
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Contact, TextValue};

    fn record() -> ResumeRecord {
        ResumeRecord {
            name: "Indra Wijaya".to_string(),
            contact: Contact {
                email: "indra@example.com".to_string(),
                phone: "+62 111".to_string(),
                location: "Bogor, Indonesia".to_string(),
            },
            profile: "Data scientist.".to_string(),
            skills_overview: vec![
                ("programming".to_string(), vec!["Python".to_string(), "SQL".to_string()]),
                ("dataTools".to_string(), vec!["Pandas".to_string()]),
                ("aaa".to_string(), vec!["Zzz".to_string()]),
            ]
            .into(),
            experience: vec![
                ExperienceEntry {
                    role: "First Role".to_string(),
                    company: "Acme".to_string(),
                    date: Some("2023".to_string()),
                    bullets: vec!["Did a thing".to_string(), "Did another".to_string()],
                },
                ExperienceEntry {
                    role: "Second Role".to_string(),
                    company: "Globex".to_string(),
                    date: None,
                    bullets: vec![],
                },
            ],
            projects: vec![
                ProjectEntry {
                    title: "Project One".to_string(),
                    details: vec!["detail a".to_string()],
                },
                ProjectEntry {
                    title: "Project Two".to_string(),
                    details: vec![],
                },
                ProjectEntry {
                    title: "Project Three".to_string(),
                    details: vec!["detail b".to_string(), "detail c".to_string()],
                },
            ],
            education: vec![EducationEntry {
                school: "Bhayangkara University".to_string(),
                degree: "Bachelor of Informatics".to_string(),
                year: TextValue::Text("2025".to_string()),
                gpa: TextValue::Text("3.61".to_string()),
            }],
            certifications: vec!["Cert A".to_string(), "Cert B".to_string()],
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_block_counts_match_record() {
        let html = render_cv(&record(), &CvStyle::default());
        assert_eq!(count(&html, "class=\"cv-experience\""), 2);
        assert_eq!(count(&html, "class=\"cv-project\""), 3);
        assert_eq!(count(&html, "class=\"cv-education\""), 1);
    }

    #[test]
    fn test_sequences_render_in_source_order() {
        let html = render_cv(&record(), &CvStyle::default());
        let first = html.find("First Role").unwrap();
        let second = html.find("Second Role").unwrap();
        assert!(first < second);

        let p1 = html.find("Project One").unwrap();
        let p2 = html.find("Project Two").unwrap();
        let p3 = html.find("Project Three").unwrap();
        assert!(p1 < p2 && p2 < p3);
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let html = render_cv(&record(), &CvStyle::default());
        let positions = [
            html.find("cv-header").unwrap(),
            html.find("cv-profile").unwrap(),
            html.find("cv-skills").unwrap(),
            html.find("cv-experience").unwrap(),
            html.find("cv-project").unwrap(),
            html.find("cv-education").unwrap(),
            html.find("cv-certifications").unwrap(),
        ];
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_skills_categories_render_in_insertion_order() {
        let html = render_cv(&record(), &CvStyle::default());
        let a = html.find("programming").unwrap();
        let b = html.find("dataTools").unwrap();
        let c = html.find("aaa").unwrap();
        assert!(a < b && b < c);
        assert!(html.contains("Python, SQL"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let record = record();
        let style = CvStyle::default();
        assert_eq!(render_cv(&record, &style), render_cv(&record, &style));
    }

    #[test]
    fn test_empty_certifications_renders_empty_container() {
        let mut record = record();
        record.certifications.clear();
        let html = render_cv(&record, &CvStyle::default());
        let start = html.find("cv-certifications").unwrap();
        let section = &html[start..start + html[start..].find("</ul>").unwrap()];
        assert!(!section.contains("<li"));
    }

    #[test]
    fn test_project_without_details_renders_zero_detail_items() {
        let html = render_cv(&record(), &CvStyle::default());
        let start = html.find("Project Two").unwrap();
        let end = html[start..].find("Project Three").unwrap() + start;
        assert!(!html[start..end].contains("cv-project-detail"));
    }

    #[test]
    fn test_empty_record_renders_without_error() {
        let html = render_cv(&ResumeRecord::default(), &CvStyle::default());
        assert!(html.contains("cv-header"));
        assert!(html.contains("cv-certifications"));
        assert_eq!(count(&html, "class=\"cv-experience\""), 0);
    }

    #[test]
    fn test_record_text_is_escaped() {
        let mut record = record();
        record.name = "Indra <script>alert(1)</script>".to_string();
        record.profile = "Loves M&Ms".to_string();
        let html = render_cv(&record, &CvStyle::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("M&amp;Ms"));
    }

    #[test]
    fn test_contact_lines_present() {
        let html = render_cv(&record(), &CvStyle::default());
        assert!(html.contains("indra@example.com"));
        assert!(html.contains("+62 111"));
        assert!(html.contains("Bogor, Indonesia"));
    }
}
