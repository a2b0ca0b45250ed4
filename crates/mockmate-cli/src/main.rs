use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod console;

use app::App;

#[derive(Parser)]
#[command(name = "mockmate")]
#[command(about = "MockMate CLI - practice technical interviews against the MockMate backend", long_about = None)]
struct Cli {
    /// Directory holding config.toml and user.toml
    #[arg(long, global = true, env = "MOCKMATE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Log at debug level (overrides MOCKMATE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long, env = "MOCKMATE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        fullname: Option<String>,
        /// Register as a recruiter instead of a candidate
        #[arg(long)]
        recruiter: bool,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Manage profile skills
    Skills {
        #[command(subcommand)]
        action: Option<SkillsAction>,
    },
    /// List job postings
    Jobs {
        /// Case-insensitive filter on title, description and skills
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Upload a CV (PDF)
    UploadCv { path: PathBuf },
    /// Live interview over the interview channel
    Interview {
        job_id: Option<String>,
        /// Resume an existing session instead of starting a new one
        #[arg(long)]
        session: Option<String>,
    },
    /// Question-by-question practice interview
    Practice { job_id: String },
    /// Show or change client configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the profile (default)
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        fullname: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
}

#[derive(Subcommand)]
enum SkillsAction {
    /// List skills (default)
    List,
    /// Add a skill with a level between 0 and 100
    Add {
        name: String,
        #[arg(long, default_value_t = 50)]
        level: u8,
    },
    /// Remove a skill by id
    Remove { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (default)
    Show,
    /// Print the config file path
    Path,
    /// Set the backend base URL
    SetUrl { url: String },
    /// Set the number of questions before the result is requested
    SetQuestionLimit { limit: usize },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        // Notifications are already printed by the console notifier.
        EnvFilter::try_from_env("MOCKMATE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn,mockmate_core::notification=off"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let app = App::init(cli.config_dir.as_deref())?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&app, &email, password).await?
        }
        Commands::Register {
            email,
            username,
            fullname,
            recruiter,
        } => commands::account::register(&app, email, username, fullname, !recruiter).await?,
        Commands::Logout => commands::account::logout(&app).await?,
        Commands::Profile { action } => match action.unwrap_or(ProfileAction::Show) {
            ProfileAction::Show => commands::account::show_profile(&app).await?,
            ProfileAction::Update {
                fullname,
                username,
                phone,
                bio,
            } => {
                commands::account::update_profile(&app, fullname, username, phone, bio).await?
            }
        },
        Commands::Skills { action } => match action.unwrap_or(SkillsAction::List) {
            SkillsAction::List => commands::account::list_skills(&app).await?,
            SkillsAction::Add { name, level } => {
                commands::account::add_skill(&app, &name, level).await?
            }
            SkillsAction::Remove { id } => commands::account::remove_skill(&app, &id).await?,
        },
        Commands::Jobs { search } => commands::jobs::list(&app, search.as_deref()).await?,
        Commands::UploadCv { path } => commands::cv::upload(&app, &path).await?,
        Commands::Interview { job_id, session } => {
            commands::interview::run(&app, job_id, session).await?
        }
        Commands::Practice { job_id } => commands::practice::run(&app, &job_id).await?,
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&app)?,
            ConfigAction::Path => commands::config::path(&app),
            ConfigAction::SetUrl { url } => commands::config::set_url(&app, &url)?,
            ConfigAction::SetQuestionLimit { limit } => {
                commands::config::set_question_limit(&app, limit)?
            }
        },
    }

    Ok(())
}
