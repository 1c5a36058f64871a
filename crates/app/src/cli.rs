use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tofula_core::filter::{StatusFilter, FILTER_ALL};
use tofula_core::personalization::{PersonalizationRequest, DEFAULT_CHILD_AGE};
use tofula_core::studio::{
    GenerationRequest, DEFAULT_AGE_RANGE, DEFAULT_CULTURE, DEFAULT_HERO_AGE, DEFAULT_HERO_NAME,
};

#[derive(Debug, Parser)]
#[command(name = "tofula", version)]
#[command(about = "Personalized children's storybooks from the terminal")]
#[command(
    after_help = "Environment:\n  NEXT_PUBLIC_API_URL  Backend base URL (default http://localhost:8000)\n  API_TIMEOUT_SECS     Per-request timeout (default 300)\n  STUDIO_PASSWORD      Studio demo password\n  TOFULA_STATE_DIR     Session directory (default .tofula)\n  RUST_LOG             Log filter\n  LOG_FORMAT           text or json"
)]
pub struct Cli {
    /// Print the decoded payload as JSON instead of the rendered page.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse approved stories.
    Catalog {
        /// Age range to show, or `all`.
        #[arg(long, default_value = FILTER_ALL)]
        age: String,
    },
    /// Show one catalog story.
    Story { id: String },
    /// Generate a personalized copy of a catalog story.
    Personalize(PersonalizeArgs),
    /// List your generated stories.
    Library,
    /// Show one generated story.
    LibraryItem { id: String },
    /// Store the bearer token used for every request.
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored token.
    Logout,
    /// Story authoring.
    Studio {
        #[command(subcommand)]
        command: StudioCommand,
    },
}

#[derive(Debug, Args)]
pub struct PersonalizeArgs {
    /// Catalog story id.
    pub id: String,
    #[arg(long)]
    pub child_name: String,
    #[arg(long, default_value_t = DEFAULT_CHILD_AGE)]
    pub age: u8,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub skin_tone: Option<String>,
    #[arg(long)]
    pub hair_color: Option<String>,
    #[arg(long)]
    pub hair_style: Option<String>,
}

impl From<PersonalizeArgs> for PersonalizationRequest {
    fn from(args: PersonalizeArgs) -> Self {
        PersonalizationRequest::new(args.id)
            .child(args.child_name, args.age)
            .gender(args.gender)
            .appearance(args.skin_tone, args.hair_color, args.hair_style)
    }
}

#[derive(Debug, Subcommand)]
pub enum StudioCommand {
    /// Unlock the studio (demo mode).
    Login {
        #[arg(long)]
        password: String,
    },
    /// Lock the studio again.
    Logout,
    /// List story templates.
    Dashboard {
        /// `all`, `draft` or `approved`.
        #[arg(long, default_value = FILTER_ALL)]
        status: StatusFilter,
    },
    /// Show one template with its pages.
    Show { id: String },
    /// Generate a new draft template with the AI pipeline.
    Generate(GenerateArgs),
    /// Create a template from a JSON file.
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Apply a JSON patch file to a template.
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Publish a draft to the catalog.
    Approve { id: String },
    /// Delete a template.
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Comma-separated themes, e.g. "adventure, courage".
    #[arg(long)]
    pub themes: String,
    #[arg(long, default_value = DEFAULT_AGE_RANGE)]
    pub age_range: String,
    #[arg(long, default_value = DEFAULT_CULTURE)]
    pub culture: String,
    #[arg(long, default_value = "")]
    pub moral: String,
    /// Placeholder hero used while drafting.
    #[arg(long, default_value = DEFAULT_HERO_NAME)]
    pub child_name: String,
    #[arg(long, default_value_t = DEFAULT_HERO_AGE)]
    pub age: u8,
}

impl From<GenerateArgs> for GenerationRequest {
    fn from(args: GenerateArgs) -> Self {
        GenerationRequest {
            themes: args.themes,
            age_range: args.age_range,
            culture: args.culture,
            moral: args.moral,
            child_name: args.child_name,
            age: args.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tofula_core::template::TemplateStatus;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_dashboard_status() {
        let cli = Cli::parse_from(["tofula", "studio", "dashboard", "--status", "draft"]);
        match cli.command {
            Command::Studio {
                command: StudioCommand::Dashboard { status },
            } => assert_eq!(status, StatusFilter::Only(TemplateStatus::Draft)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["tofula", "studio", "dashboard", "--status", "live"]).is_err());
    }

    #[test]
    fn personalize_defaults_age() {
        let cli = Cli::parse_from(["tofula", "personalize", "tpl-1", "--child-name", "Maya"]);
        let Command::Personalize(args) = cli.command else {
            panic!("expected personalize");
        };
        let request = PersonalizationRequest::from(args);
        assert_eq!(request.age, DEFAULT_CHILD_AGE);
        assert_eq!(request.story_template_id, "tpl-1");
    }

    #[test]
    fn generate_fills_form_defaults() {
        let cli = Cli::parse_from(["tofula", "--json", "studio", "generate", "--themes", "courage"]);
        assert!(cli.json);
        let Command::Studio {
            command: StudioCommand::Generate(args),
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(GenerationRequest::from(args), GenerationRequest::new("courage"));
    }
}
