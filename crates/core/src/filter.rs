//! List filters used by the catalog and studio dashboard pages.
//!
//! Both filters have an "all" value that leaves the list untouched; any
//! other value keeps exactly the items whose field equals it.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::template::{StoryTemplate, TemplateStatus};

/// Wire and display value of the "no filter" option.
pub const FILTER_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

/// Status filter of the studio dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TemplateStatus),
}

impl StatusFilter {
    /// Value of the `status_filter` query parameter, if one is sent.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status.as_str()),
        }
    }

    pub fn matches(self, template: &StoryTemplate) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => template.status == status,
        }
    }

    pub fn apply<'a>(self, templates: &'a [StoryTemplate]) -> Vec<&'a StoryTemplate> {
        templates.iter().filter(|t| self.matches(t)).collect()
    }
}

impl From<Option<TemplateStatus>> for StatusFilter {
    fn from(status: Option<TemplateStatus>) -> Self {
        status.map_or(StatusFilter::All, StatusFilter::Only)
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(FILTER_ALL) || s.trim().is_empty() {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(FILTER_ALL),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Age-range filter
// ---------------------------------------------------------------------------

/// Age-range filter of the customer catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AgeFilter {
    #[default]
    All,
    Range(String),
}

impl AgeFilter {
    pub fn matches(&self, template: &StoryTemplate) -> bool {
        match self {
            AgeFilter::All => true,
            AgeFilter::Range(range) => template.age_range == *range,
        }
    }

    pub fn apply<'a>(&self, templates: &'a [StoryTemplate]) -> Vec<&'a StoryTemplate> {
        templates.iter().filter(|t| self.matches(t)).collect()
    }

    /// Filter options offered for a list: "all" first, then each distinct
    /// age range in the order it first appears.
    pub fn options(templates: &[StoryTemplate]) -> Vec<AgeFilter> {
        let mut options = vec![AgeFilter::All];
        for template in templates {
            let option = AgeFilter::Range(template.age_range.clone());
            if !options.contains(&option) {
                options.push(option);
            }
        }
        options
    }
}

impl From<&str> for AgeFilter {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(FILTER_ALL) {
            AgeFilter::All
        } else {
            AgeFilter::Range(s.to_string())
        }
    }
}

impl fmt::Display for AgeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeFilter::All => f.write_str(FILTER_ALL),
            AgeFilter::Range(range) => f.write_str(range),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
