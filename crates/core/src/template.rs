//! Story templates: the authored, not-yet-personalized story definitions
//! served by the catalog and managed in the studio.
//!
//! Templates are decoded from the backend verbatim; the front end only
//! checks the fields it needs to display and the status it filters on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{TemplateId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Template is still being edited in the studio.
pub const STATUS_DRAFT: &str = "draft";

/// Template is published to the customer catalog.
pub const STATUS_APPROVED: &str = "approved";

/// Review status of a story template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStatus {
    Draft,
    Approved,
}

impl TemplateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateStatus::Draft => STATUS_DRAFT,
            TemplateStatus::Approved => STATUS_APPROVED,
        }
    }
}

impl fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            STATUS_DRAFT => Ok(TemplateStatus::Draft),
            STATUS_APPROVED => Ok(TemplateStatus::Approved),
            _ => Err(CoreError::UnknownValue {
                kind: "template status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single page of a template. Placeholders such as `{child_name}` are
/// filled in by the backend during personalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePage {
    pub page_number: i32,
    pub template_text: String,
    pub base_prompt: String,
}

/// A story template as returned by the catalog and studio endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryTemplate {
    pub id: TemplateId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    pub themes: String,
    pub age_range: String,
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default)]
    pub moral: Option<String>,
    #[serde(default)]
    pub reading_level: Option<String>,
    pub status: TemplateStatus,
    #[serde(default)]
    pub pages: Vec<TemplatePage>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub extra_metadata: serde_json::Map<String, serde_json::Value>,
}

impl StoryTemplate {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Body of `POST /studio/stories`: a template authored by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewTemplate {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub themes: String,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub age_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub culture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moral: Option<String>,
    pub pages: Vec<TemplatePage>,
}

/// Body of `PATCH /studio/stories/{id}`. Fields left as `None` are not
/// sent and therefore left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub themes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub culture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moral: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<TemplatePage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TemplateStatus>,
}

impl TemplatePatch {
    /// `true` when no field would be sent.
    pub fn is_empty(&self) -> bool {
        *self == TemplatePatch::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
