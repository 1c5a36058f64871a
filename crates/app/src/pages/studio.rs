//! Studio pages: demo-mode login, the template dashboard, template detail
//! and the new-story generation form.

use tofula_client::{ApiError, ApiResult, Navigator, Session, SessionError};
use tofula_core::error::CoreError;
use tofula_core::filter::StatusFilter;
use tofula_core::routes::Route;
use tofula_core::template::{StoryTemplate, TemplateStatus};

use crate::view::{count_noun, date, template_card, Render};

pub const INCORRECT_PASSWORD: &str = "Incorrect password";
pub const EMPTY_STATE: &str = "No story templates yet";
pub const GENERATION_FAILED: &str = "Failed to generate story";

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Demo mode: the password is checked on this machine only.
pub struct StudioLoginPage;

impl StudioLoginPage {
    /// Check the password and, on success, set the studio flag and move on
    /// to the dashboard. Returns the message to show on failure.
    pub fn submit(
        session: &Session,
        navigator: &dyn Navigator,
        password: &str,
        expected: &str,
    ) -> Result<(), String> {
        match session.studio_login(password, expected) {
            Ok(()) => {
                navigator.redirect(&Route::StudioDashboard);
                Ok(())
            }
            Err(SessionError::Rejected(CoreError::Validation(msg))) => {
                tracing::warn!("Studio login rejected");
                Err(msg)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store studio flag");
                Err(e.to_string())
            }
        }
    }

    /// Clear the studio flag and return to the login page.
    pub fn logout(session: &Session, navigator: &dyn Navigator) -> Result<(), SessionError> {
        session.studio_logout()?;
        navigator.redirect(&Route::StudioLogin);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub struct DashboardPage {
    stories: Vec<StoryTemplate>,
    filter: StatusFilter,
}

impl DashboardPage {
    /// Build the dashboard from the studio listing. Only templates matching
    /// `filter` are kept; a failed load is logged and shown as empty.
    pub fn new(result: ApiResult<Vec<StoryTemplate>>, filter: StatusFilter) -> Self {
        let stories = match result {
            Ok(stories) => stories.into_iter().filter(|t| filter.matches(t)).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load stories");
                Vec::new()
            }
        };
        Self { stories, filter }
    }

    pub fn stories(&self) -> &[StoryTemplate] {
        &self.stories
    }
}

fn status_badge(status: TemplateStatus) -> &'static str {
    match status {
        TemplateStatus::Approved => "Approved",
        TemplateStatus::Draft => "Draft",
    }
}

impl Render for DashboardPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![
            "Story Templates".to_string(),
            "Manage and create premium story experiences".to_string(),
        ];
        let options = [
            StatusFilter::All,
            StatusFilter::Only(TemplateStatus::Draft),
            StatusFilter::Only(TemplateStatus::Approved),
        ]
        .map(|f| {
            if f == self.filter {
                format!("[{f}]")
            } else {
                f.to_string()
            }
        });
        lines.push(format!("Status: {}", options.join(" ")));
        lines.push(String::new());

        let stories = self.stories();
        if stories.is_empty() {
            lines.push(EMPTY_STATE.to_string());
            lines.push("Create Your First Story: tofula studio generate --themes <THEMES>".to_string());
            return lines;
        }

        for story in stories {
            let mut card = template_card(story);
            card[0] = format!("{}  ({})", card[0], status_badge(story.status));
            lines.extend(card);
            if story.status == TemplateStatus::Draft {
                lines.push(format!("  Approve: tofula studio approve {}", story.id));
            }
        }
        lines.push(String::new());
        lines.push(count_noun(stories.len(), "template", "templates"));
        lines
    }
}

// ---------------------------------------------------------------------------
// Template detail
// ---------------------------------------------------------------------------

/// Full view of one template, pages included.
pub struct TemplateDetail<'a>(pub &'a StoryTemplate);

impl Render for TemplateDetail<'_> {
    fn render(&self) -> Vec<String> {
        let t = self.0;
        let mut lines = vec![
            format!("{}  ({})", t.title, status_badge(t.status)),
            format!("Id: {}", t.id),
            format!("Ages: {}", t.age_range),
            format!("Themes: {}", t.themes),
        ];
        for (label, value) in [
            ("Description", &t.description),
            ("Culture", &t.culture),
            ("Moral", &t.moral),
            ("Reading Level", &t.reading_level),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                lines.push(format!("{label}: {value}"));
            }
        }
        if let Some(updated) = &t.updated_at {
            lines.push(format!("Updated: {}", date(updated)));
        }
        lines.push(String::new());
        for page in &t.pages {
            lines.push(format!("Page {}: {}", page.page_number, page.template_text));
        }
        lines
    }
}

// ---------------------------------------------------------------------------
// New story
// ---------------------------------------------------------------------------

/// Result of submitting the generation form.
#[derive(Debug)]
pub enum NewStoryOutcome {
    Created(StoryTemplate),
    Failed(String),
}

impl NewStoryOutcome {
    /// Settle a generation attempt. Success returns to the dashboard.
    pub fn settle(result: ApiResult<StoryTemplate>, navigator: &dyn Navigator) -> Self {
        match result {
            Ok(template) => {
                tracing::info!(template_id = %template.id, "Story template generated");
                navigator.redirect(&Route::StudioDashboard);
                NewStoryOutcome::Created(template)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate story template");
                let message = match &e {
                    ApiError::Invalid(_) | ApiError::Unauthorized => e.user_message(),
                    _ => e
                        .detail()
                        .map_or_else(|| GENERATION_FAILED.to_string(), str::to_string),
                };
                NewStoryOutcome::Failed(message)
            }
        }
    }
}

impl Render for NewStoryOutcome {
    fn render(&self) -> Vec<String> {
        match self {
            NewStoryOutcome::Created(template) => {
                let mut lines = vec![format!("Generated draft \"{}\"", template.title)];
                lines.extend(TemplateDetail(template).render());
                lines
            }
            NewStoryOutcome::Failed(message) => vec![format!("Error: {message}")],
        }
    }
}
