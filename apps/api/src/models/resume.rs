//! Resume data model — the structured record feeding the CV template.
#![allow(dead_code)]
//!
//! Every field is optional-safe: a record with absent collections
//! deserializes to empty ones and renders as empty containers, never failing.
//! `skills_overview` must preserve the document order of its keys, so it is
//! backed by an entry vector with a hand-written map (de)serializer rather
//! than a sorted map.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: String,
    pub contact: Contact,
    pub profile: String,
    #[serde(rename = "skillsOverview")]
    pub skills_overview: SkillsOverview,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub year: TextValue,
    pub gpa: TextValue,
}

// ────────────────────────────────────────────────────────────────────────────
// TextValue — string-or-number scalar
// ────────────────────────────────────────────────────────────────────────────

/// A scalar that renders as text but may be authored as either a JSON string
/// or a JSON number (`"2025"` and `2025` are both valid years).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    Number(serde_json::Number),
}

impl Default for TextValue {
    fn default() -> Self {
        TextValue::Text(String::new())
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextValue::Text(s) => f.write_str(s),
            TextValue::Number(n) => write!(f, "{n}"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SkillsOverview — ordered category → skills mapping
// ────────────────────────────────────────────────────────────────────────────

/// Ordered mapping from skill-category name to its skill list.
///
/// JSON object key order IS the render order, so entries are stored as a
/// vector in document order and round-trip through a map representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsOverview(Vec<(String, Vec<String>)>);

impl SkillsOverview {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, Vec<String>)>> for SkillsOverview {
    fn from(entries: Vec<(String, Vec<String>)>) -> Self {
        SkillsOverview(entries)
    }
}

impl Serialize for SkillsOverview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, skills) in &self.0 {
            map.serialize_entry(category, skills)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillsOverview {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor;

        impl<'de> Visitor<'de> for OrderedMapVisitor {
            type Value = SkillsOverview;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to skill list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(SkillsOverview(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor)
    }
}
