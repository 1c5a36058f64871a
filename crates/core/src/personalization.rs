//! Personalization requests: a child's details applied to a template.
//!
//! The appearance fields are free-form and forwarded verbatim; the only
//! checks done here are the ones the customization form enforces before
//! anything is sent.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{InstanceId, TemplateId, Timestamp};

/// Youngest age the customization form accepts.
pub const MIN_CHILD_AGE: u8 = 3;

/// Oldest age the customization form accepts.
pub const MAX_CHILD_AGE: u8 = 12;

/// Age pre-filled in a fresh customization form.
pub const DEFAULT_CHILD_AGE: u8 = 5;

/// Body of `POST /stories/personalize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonalizationRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub story_template_id: TemplateId,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub child_name: String,
    #[validate(range(min = 3, max = 12, message = "must be between 3 and 12"))]
    pub age: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_style: Option<String>,
}

impl PersonalizationRequest {
    /// A blank form for the given template, age pre-set to
    /// [`DEFAULT_CHILD_AGE`].
    pub fn new(story_template_id: impl Into<TemplateId>) -> Self {
        Self {
            story_template_id: story_template_id.into(),
            child_name: String::new(),
            age: DEFAULT_CHILD_AGE,
            gender: None,
            skin_tone: None,
            hair_color: None,
            hair_style: None,
        }
    }

    pub fn child(mut self, name: impl Into<String>, age: u8) -> Self {
        self.child_name = name.into();
        self.age = age;
        self
    }

    pub fn gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn appearance(
        mut self,
        skin_tone: Option<String>,
        hair_color: Option<String>,
        hair_style: Option<String>,
    ) -> Self {
        self.skin_tone = skin_tone;
        self.hair_color = hair_color;
        self.hair_style = hair_style;
        self
    }

    /// Trim the name and drop optional fields left blank, then validate.
    ///
    /// Blank optional inputs are not sent at all, matching an untouched
    /// form field.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.child_name = self.child_name.trim().to_string();
        for field in [
            &mut self.gender,
            &mut self.skin_tone,
            &mut self.hair_color,
            &mut self.hair_style,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
        self.validate()?;
        Ok(self)
    }
}

/// One personalized page in a [`PersonalizationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedPage {
    pub page_number: i32,
    pub text: String,
    #[serde(default)]
    pub illustration_url: Option<String>,
}

/// Response of `POST /stories/personalize`.
///
/// Only `instance_id` is required; the story page displays whatever else
/// the backend chose to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationResult {
    pub instance_id: InstanceId,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pages: Vec<PersonalizedPage>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
