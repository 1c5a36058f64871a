//! Customer catalog: approved templates with an age-range filter.

use tofula_client::ApiResult;
use tofula_core::filter::AgeFilter;
use tofula_core::template::StoryTemplate;

use crate::view::{count_noun, template_card, Render};

pub const EMPTY_STATE: &str = "No stories found for this age range";

pub struct CatalogPage {
    stories: Vec<StoryTemplate>,
    age: AgeFilter,
}

impl CatalogPage {
    /// Build the page from the catalog fetch. A failed load is logged and
    /// shown as an empty catalog.
    pub fn new(result: ApiResult<Vec<StoryTemplate>>, age: AgeFilter) -> Self {
        let stories = match result {
            Ok(stories) => stories,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog");
                Vec::new()
            }
        };
        Self { stories, age }
    }

    /// Filter choices, derived from the unfiltered list.
    pub fn age_options(&self) -> Vec<AgeFilter> {
        AgeFilter::options(&self.stories)
    }

    pub fn visible(&self) -> Vec<&StoryTemplate> {
        self.age.apply(&self.stories)
    }
}

impl Render for CatalogPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Story Catalog".to_string()];
        let options: Vec<String> = self
            .age_options()
            .iter()
            .map(|o| {
                if *o == self.age {
                    format!("[{o}]")
                } else {
                    o.to_string()
                }
            })
            .collect();
        lines.push(format!("Ages: {}", options.join(" ")));
        lines.push(String::new());

        let visible = self.visible();
        if visible.is_empty() {
            lines.push(EMPTY_STATE.to_string());
            lines.push("View all stories: tofula catalog --age all".to_string());
            return lines;
        }

        for story in &visible {
            lines.extend(template_card(story));
            lines.push(format!("  Customize: tofula story {}", story.id));
        }
        lines.push(String::new());
        lines.push(format!(
            "Showing {}",
            count_noun(visible.len(), "story", "stories")
        ));
        lines
    }
}
