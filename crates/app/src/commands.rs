//! Command dispatch: fetch, build the page, print it.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context as _};
use serde::Serialize;
use tofula_client::{ApiError, ApiResult, FileStore, Session, StudioGuard, TofulaApi};
use tofula_core::filter::AgeFilter;
use tofula_core::template::{NewTemplate, TemplatePatch};

use crate::cli::{Cli, Command, StudioCommand};
use crate::config::AppConfig;
use crate::navigator::TerminalNavigator;
use crate::pages::{
    CatalogPage, DashboardPage, LibraryItemView, LibraryPage, NewStoryOutcome, PersonalizeOutcome,
    StoryPage, StudioLoginPage, TemplateDetail,
};
use crate::view::Render;

/// Everything a command needs.
pub struct Context {
    pub api: TofulaApi,
    pub session: Session,
    pub navigator: Arc<TerminalNavigator>,
    pub studio_password: String,
}

impl Context {
    /// Wire the session file, navigator and API client together.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store = FileStore::in_dir(&config.state_dir).with_context(|| {
            format!("Failed to open session in {}", config.state_dir.display())
        })?;
        tracing::debug!(path = %store.path().display(), "Session file");
        let session = Session::new(Arc::new(store));
        Self::new(config, session)
    }

    pub fn new(config: &AppConfig, session: Session) -> anyhow::Result<Self> {
        let navigator = Arc::new(TerminalNavigator::new());
        let api = TofulaApi::new(&config.client, session.clone(), navigator.clone())?;
        tracing::debug!(api_url = %api.base_url(), "API client ready");
        Ok(Self {
            api,
            session,
            navigator,
            studio_password: config.client.studio_password.clone(),
        })
    }

    /// Mount the studio guard; `false` means the redirect was issued.
    fn studio_authorized(&self) -> bool {
        let mut guard = StudioGuard::new(self.session.clone(), self.navigator.clone());
        guard.mount(|| ()).is_some()
    }
}

/// Run one command, writing its output to `out`.
pub async fn run(cli: Cli, ctx: &Context, out: &mut impl Write) -> anyhow::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Catalog { age } => {
            let result = signed_in(ctx.api.list_catalog().await)?;
            let age = AgeFilter::from(age.as_str());
            if json {
                return print_json(out, &age.apply(&result?));
            }
            print_page(out, &CatalogPage::new(result, age))
        }
        Command::Story { id } => {
            let result = signed_in(ctx.api.get_catalog_story(&id).await)?;
            if json {
                return print_json(out, &result?);
            }
            print_page(out, &StoryPage::new(result))
        }
        Command::Personalize(args) => {
            let result = signed_in(ctx.api.personalize(args.into()).await)?;
            let outcome = PersonalizeOutcome::settle(result, ctx.navigator.as_ref());
            match &outcome {
                PersonalizeOutcome::Failed(message) => bail!(message.clone()),
                PersonalizeOutcome::Generated(generated) if json => print_json(out, generated),
                PersonalizeOutcome::Generated(_) => print_page(out, &outcome),
            }
        }
        Command::Library => {
            let result = signed_in(ctx.api.list_library().await)?;
            if json {
                return print_json(out, &result?);
            }
            print_page(out, &LibraryPage::new(result))
        }
        Command::LibraryItem { id } => {
            let story = ctx.api.get_library_story(&id).await?;
            if json {
                return print_json(out, &story);
            }
            print_page(out, &LibraryItemView(&story))
        }
        Command::Login { token } => {
            ctx.session.sign_in(&token)?;
            writeln!(out, "Signed in.")?;
            Ok(())
        }
        Command::Logout => {
            ctx.session.sign_out()?;
            writeln!(out, "Signed out.")?;
            Ok(())
        }
        Command::Studio { command } => run_studio(command, json, ctx, out).await,
    }
}

async fn run_studio(
    command: StudioCommand,
    json: bool,
    ctx: &Context,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        StudioCommand::Login { password } => {
            StudioLoginPage::submit(
                &ctx.session,
                ctx.navigator.as_ref(),
                &password,
                &ctx.studio_password,
            )
            .map_err(anyhow::Error::msg)?;
            writeln!(out, "Studio unlocked.")?;
            Ok(())
        }
        StudioCommand::Logout => {
            StudioLoginPage::logout(&ctx.session, ctx.navigator.as_ref())?;
            writeln!(out, "Studio locked.")?;
            Ok(())
        }
        guarded => {
            if !ctx.studio_authorized() {
                bail!("Studio access required");
            }
            run_guarded(guarded, json, ctx, out).await
        }
    }
}

async fn run_guarded(
    command: StudioCommand,
    json: bool,
    ctx: &Context,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        StudioCommand::Dashboard { status } => {
            let result = signed_in(ctx.api.list_studio_stories(status).await)?;
            if json {
                return print_json(out, &result?);
            }
            print_page(out, &DashboardPage::new(result, status))
        }
        StudioCommand::Show { id } => {
            let template = ctx.api.get_studio_story(&id).await?;
            if json {
                return print_json(out, &template);
            }
            print_page(out, &TemplateDetail(&template))
        }
        StudioCommand::Generate(args) => {
            let result = signed_in(ctx.api.generate_studio_story(args.into()).await)?;
            let outcome = NewStoryOutcome::settle(result, ctx.navigator.as_ref());
            match &outcome {
                NewStoryOutcome::Failed(message) => bail!(message.clone()),
                NewStoryOutcome::Created(template) if json => print_json(out, template),
                NewStoryOutcome::Created(_) => print_page(out, &outcome),
            }
        }
        StudioCommand::Create { file } => {
            let template: NewTemplate = read_json(&file)?;
            let created = ctx.api.create_studio_story(&template).await?;
            if json {
                return print_json(out, &created);
            }
            writeln!(out, "Created \"{}\"", created.title)?;
            print_page(out, &TemplateDetail(&created))
        }
        StudioCommand::Update { id, file } => {
            let patch: TemplatePatch = read_json(&file)?;
            if patch.is_empty() {
                bail!("{} contains no fields to update", file.display());
            }
            let updated = ctx.api.update_studio_story(&id, &patch).await?;
            if json {
                return print_json(out, &updated);
            }
            writeln!(out, "Updated \"{}\"", updated.title)?;
            print_page(out, &TemplateDetail(&updated))
        }
        StudioCommand::Approve { id } => {
            let approved = ctx.api.approve_studio_story(&id).await?;
            if json {
                return print_json(out, &approved);
            }
            writeln!(out, "Approved \"{}\"; it is now in the catalog.", approved.title)?;
            Ok(())
        }
        StudioCommand::Delete { id } => {
            ctx.api.delete_studio_story(&id).await?;
            writeln!(out, "Deleted {id}.")?;
            Ok(())
        }
        // Handled before the guard.
        StudioCommand::Login { .. } | StudioCommand::Logout => Ok(()),
    }
}

/// Pages swallow load failures, but a rejected session must still end
/// the command with an error.
fn signed_in<T>(result: ApiResult<T>) -> anyhow::Result<ApiResult<T>> {
    match result {
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized.into()),
        other => Ok(other),
    }
}

fn print_page(out: &mut impl Write, page: &dyn Render) -> anyhow::Result<()> {
    for line in page.render() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}
