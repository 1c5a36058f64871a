//! Customer library: the signed-in user's generated stories.

use tofula_client::ApiResult;
use tofula_core::library::StoryInstance;

use crate::view::{count_noun, date, Render};

pub const EMPTY_STATE: &str = "Your library is empty";
pub const NOT_AVAILABLE: &str = "Story not available";

pub struct LibraryPage {
    stories: Vec<StoryInstance>,
}

impl LibraryPage {
    /// A failed load is logged and shown as an empty library.
    pub fn new(result: ApiResult<Vec<StoryInstance>>) -> Self {
        let stories = match result {
            Ok(stories) => stories,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load library");
                Vec::new()
            }
        };
        Self { stories }
    }

    pub fn stories(&self) -> &[StoryInstance] {
        &self.stories
    }
}

impl Render for LibraryPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["My Library".to_string()];
        let stories = self.stories();
        if stories.is_empty() {
            lines.push(EMPTY_STATE.to_string());
            lines.push(
                "Start creating personalized stories for your child! Browse our catalog: tofula catalog"
                    .to_string(),
            );
            return lines;
        }

        for story in stories {
            lines.extend(LibraryItemView(story).render());
        }
        lines.push(String::new());
        lines.push(format!(
            "{} in your library",
            count_noun(stories.len(), "story", "stories")
        ));
        lines
    }
}

/// Card for one generated story.
pub struct LibraryItemView<'a>(pub &'a StoryInstance);

impl Render for LibraryItemView<'_> {
    fn render(&self) -> Vec<String> {
        let story = self.0;
        let mut lines = vec![format!("{}  [{}]", story.display_title(), story.id)];
        if let Some(child) = story.child_name.as_deref().filter(|c| !c.is_empty()) {
            lines.push(format!("  For {child}"));
        }

        let mut meta = Vec::new();
        if let Some(age) = story.age {
            meta.push(format!("Age {age}"));
        }
        if let Some(status) = &story.status {
            meta.push(status.as_str().to_string());
        }
        if !meta.is_empty() {
            lines.push(format!("  {}", meta.join(" | ")));
        }
        if let Some(created) = &story.created_at {
            lines.push(format!("  Created {}", date(created)));
        }

        match story.pdf_url.as_deref().filter(|_| story.is_readable()) {
            Some(url) => {
                lines.push(format!("  View Story: {url}"));
                lines.push(format!("  Download PDF: {url}"));
            }
            None => lines.push(format!("  {NOT_AVAILABLE}")),
        }
        lines
    }
}
