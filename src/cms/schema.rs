//! Ingress schema for CMS responses
//!
//! Validated serde models for the `{ data, meta }` envelopes the CMS returns.
//! Required fields are required here; a 200 response that does not fit these
//! shapes is a shape mismatch and the whole page falls back to static content.
//! Optional fields default field-locally since their absence is a valid shape.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level response envelope. `meta` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// One CMS entry: numeric id plus the typed attribute record.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry<T> {
    pub id: u64,
    pub attributes: T,
}

/// Attributes of the `home` single type.
#[derive(Debug, Clone, Deserialize)]
pub struct HomeAttrs {
    pub headline: String,
    /// Markdown rich text.
    pub subline: String,
    #[serde(rename = "featuredBadge", default)]
    pub featured_badge: Option<String>,
    pub avatar: MediaField,
    #[serde(rename = "socialLinks", default)]
    pub social_links: Vec<SocialLinkAttrs>,
}

/// Attributes of the `about` single type.
#[derive(Debug, Clone, Deserialize)]
pub struct AboutAttrs {
    pub title: String,
    /// Markdown rich text.
    pub intro: String,
    pub portrait: MediaField,
    #[serde(default)]
    pub skills: Vec<SkillAttrs>,
    #[serde(rename = "workHistory", default)]
    pub work_history: Vec<WorkAttrs>,
}

/// Attributes of one `articles` collection entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleAttrs {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Markdown rich text.
    pub summary: String,
    #[serde(rename = "publishedAt")]
    pub published_at: NaiveDate,
    #[serde(default)]
    pub cover: Option<MediaField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillAttrs {
    pub name: String,
    /// Proficiency label: beginner, intermediate, advanced or expert.
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkAttrs {
    pub company: String,
    pub role: String,
    pub timeframe: String,
    /// Markdown rich text.
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLinkAttrs {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A media relation: the CMS nests the actual file under `data`, which is
/// null when the field is unset.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaField {
    pub data: Option<Entry<MediaAttrs>>,
}

/// Attributes of an uploaded media file.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaAttrs {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "alternativeText", default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Generated size variants keyed by name (thumbnail, small, medium, large).
    #[serde(default)]
    pub formats: Option<HashMap<String, MediaFormat>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaFormat {
    pub url: String,
    pub width: u32,
    pub height: u32,
}
