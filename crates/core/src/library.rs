//! Library items: story instances generated for a user.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{InstanceId, TemplateId, Timestamp};

/// Title shown for an instance whose backend record carries none.
pub const UNTITLED_STORY: &str = "Untitled Story";

/// Generation status of a story instance.
///
/// The backend is free to introduce new states; anything other than the
/// two known values is kept verbatim so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceStatus {
    Completed,
    Generating,
    Other(String),
}

impl InstanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InstanceStatus::Completed => "completed",
            InstanceStatus::Generating => "generating",
            InstanceStatus::Other(s) => s,
        }
    }
}

impl From<String> for InstanceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "completed" => InstanceStatus::Completed,
            "generating" => InstanceStatus::Generating,
            _ => InstanceStatus::Other(s),
        }
    }
}

impl From<InstanceStatus> for String {
    fn from(status: InstanceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated story in the user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryInstance {
    pub id: InstanceId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    #[serde(default)]
    pub template_title: Option<String>,
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub status: Option<InstanceStatus>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl StoryInstance {
    /// The instance title, falling back to the joined template title and
    /// then to [`UNTITLED_STORY`].
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.template_title.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED_STORY)
    }

    /// A PDF can be viewed or downloaded.
    pub fn is_readable(&self) -> bool {
        self.pdf_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
