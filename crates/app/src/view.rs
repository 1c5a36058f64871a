//! Shared view-state pieces for the terminal pages.

use chrono::{DateTime, Utc};
use tofula_core::template::StoryTemplate;

/// A page's view of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Failed(String),
    Loaded(T),
}

impl<T> Loadable<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Anything that renders to terminal lines.
pub trait Render {
    fn render(&self) -> Vec<String>;
}

/// `1 story`, `3 stories`.
pub fn count_noun(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

pub fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Summary card for a template, used by the catalog and the dashboard.
pub fn template_card(template: &StoryTemplate) -> Vec<String> {
    let mut lines = vec![format!("{}  [{}]", template.title, template.id)];
    if let Some(description) = template.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("  {description}"));
    }
    lines.push(format!(
        "  Ages {} | {} | {}",
        template.age_range,
        count_noun(template.page_count(), "page", "pages"),
        template.themes
    ));
    lines
}
