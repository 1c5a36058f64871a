//! Story detail page and the customization (personalize) action.

use tofula_client::{ApiError, ApiResult, Navigator};
use tofula_core::personalization::PersonalizationResult;
use tofula_core::routes::Route;
use tofula_core::template::StoryTemplate;

use crate::view::{count_noun, Loadable, Render};

pub const NOT_FOUND_TITLE: &str = "Story Not Found";
pub const GENERATED_MESSAGE: &str =
    "Story generated successfully! Check your library to view it.";
pub const GENERATION_FAILED: &str = "Failed to generate story. Please try again.";

pub struct StoryPage {
    story: Loadable<StoryTemplate>,
}

impl StoryPage {
    /// Any load failure shows the not-found page; the cause is logged.
    pub fn new(result: ApiResult<StoryTemplate>) -> Self {
        let story = match result {
            Ok(story) => Loadable::Loaded(story),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load story");
                Loadable::Failed(e.user_message())
            }
        };
        Self { story }
    }

    pub fn story(&self) -> Option<&StoryTemplate> {
        self.story.loaded()
    }
}

impl Render for StoryPage {
    fn render(&self) -> Vec<String> {
        let story = match &self.story {
            Loadable::Failed(_) => {
                return vec![
                    NOT_FOUND_TITLE.to_string(),
                    "We couldn't find the story you're looking for.".to_string(),
                    "Browse all stories: tofula catalog".to_string(),
                ]
            }
            Loadable::Loaded(story) => story,
        };

        let mut lines = vec![format!("Catalog / {}", story.title), story.title.clone()];
        if let Some(description) = &story.description {
            lines.push(description.clone());
        }
        lines.push(String::new());
        lines.push(format!("Ages: {}", story.age_range));
        lines.push(format!("Themes: {}", story.themes));
        if let Some(culture) = story.culture.as_deref().filter(|c| !c.is_empty()) {
            lines.push(format!("Culture: {culture}"));
        }
        if let Some(moral) = story.moral.as_deref().filter(|m| !m.is_empty()) {
            lines.push(format!("Moral of the Story: \"{moral}\""));
        }
        if let Some(level) = story.reading_level.as_deref().filter(|l| !l.is_empty()) {
            lines.push(format!("Reading Level: {level}"));
        }
        lines.push(count_noun(story.page_count(), "page", "pages"));
        lines.push(String::new());
        lines.push(format!(
            "Personalize: tofula personalize {} --child-name <NAME> --age <3-12>",
            story.id
        ));
        lines.push(
            "Story generation takes 2-3 minutes and creates a fully illustrated, customized PDF."
                .to_string(),
        );
        lines
    }
}

/// Result of submitting the customization form.
#[derive(Debug)]
pub enum PersonalizeOutcome {
    Generated(PersonalizationResult),
    Failed(String),
}

impl PersonalizeOutcome {
    /// Settle a personalization attempt. Success sends the user on to the
    /// library.
    pub fn settle(result: ApiResult<PersonalizationResult>, navigator: &dyn Navigator) -> Self {
        match result {
            Ok(generated) => {
                tracing::info!(instance_id = %generated.instance_id, "Story personalized");
                navigator.redirect(&Route::Library);
                PersonalizeOutcome::Generated(generated)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate story");
                PersonalizeOutcome::Failed(failure_message(&e))
            }
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, PersonalizeOutcome::Generated(_))
    }
}

/// The backend's `detail` when it sent one, otherwise the generic message.
fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Invalid(_) | ApiError::Unauthorized => error.user_message(),
        _ => error
            .detail()
            .map_or_else(|| GENERATION_FAILED.to_string(), str::to_string),
    }
}

impl Render for PersonalizeOutcome {
    fn render(&self) -> Vec<String> {
        match self {
            PersonalizeOutcome::Generated(result) => {
                let mut lines = vec![GENERATED_MESSAGE.to_string()];
                if let Some(title) = &result.title {
                    lines.push(format!("Title: {title}"));
                }
                lines.push(format!("Story id: {}", result.instance_id));
                lines.push("View in Library: tofula library".to_string());
                lines
            }
            PersonalizeOutcome::Failed(message) => vec![message.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fixtures::template;
    use assert_matches::assert_matches;
    use tofula_client::RecordingNavigator;
    use tofula_core::error::CoreError;

    #[test]
    fn renders_optional_fields_only_when_present() {
        let mut story = template("t1", "4-6", "approved");
        story.moral = Some("Be brave".into());
        let lines = StoryPage::new(Ok(story)).render();
        assert!(lines.contains(&"Moral of the Story: \"Be brave\"".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Culture:")));
        assert!(lines.contains(&"2 pages".to_string()));
    }

    #[test]
    fn missing_story_renders_not_found() {
        let page = StoryPage::new(Err(ApiError::Api {
            status: 404,
            message: "Story not found in catalog".into(),
            detail: Some("Story not found in catalog".into()),
        }));
        assert!(page.story().is_none());
        assert_eq!(page.render()[0], NOT_FOUND_TITLE);
    }

    #[test]
    fn success_redirects_to_library() {
        let nav = RecordingNavigator::new();
        let result: PersonalizationResult =
            serde_json::from_value(serde_json::json!({"instance_id": "i1"})).unwrap();

        let outcome = PersonalizeOutcome::settle(Ok(result), &nav);

        assert!(outcome.is_generated());
        assert_eq!(outcome.render()[0], GENERATED_MESSAGE);
        assert_eq!(nav.visits(), vec![Route::Library]);
    }

    #[test]
    fn failure_shows_backend_detail() {
        let nav = RecordingNavigator::new();
        let outcome = PersonalizeOutcome::settle(
            Err(ApiError::Api {
                status: 404,
                message: "Story template not found".into(),
                detail: Some("Story template not found".into()),
            }),
            &nav,
        );
        assert_matches!(&outcome, PersonalizeOutcome::Failed(m) if m == "Story template not found");
        assert_eq!(nav.count(), 0);
    }

    #[test]
    fn failure_without_detail_uses_generic_message() {
        let nav = RecordingNavigator::new();
        let outcome = PersonalizeOutcome::settle(
            Err(ApiError::Config("bad".into())),
            &nav,
        );
        assert_matches!(&outcome, PersonalizeOutcome::Failed(m) if m == GENERATION_FAILED);
    }

    #[test]
    fn error_body_without_detail_uses_generic_message() {
        let nav = RecordingNavigator::new();
        for (status, body) in [(500, "{}"), (422, r#"{"detail":[{"msg":"bad"}]}"#), (502, "")] {
            let outcome = PersonalizeOutcome::settle(
                Err(ApiError::Api {
                    status,
                    message: body.to_string(),
                    detail: None,
                }),
                &nav,
            );
            assert_eq!(outcome.render(), [GENERATION_FAILED]);
        }
    }

    #[test]
    fn validation_failure_explains_the_field() {
        let nav = RecordingNavigator::new();
        let outcome = PersonalizeOutcome::settle(
            Err(ApiError::Invalid(CoreError::Validation("age must be between 3 and 12".into()))),
            &nav,
        );
        assert_matches!(&outcome, PersonalizeOutcome::Failed(m) if m.contains("age"));
    }
}
