use clap::{Parser, Subcommand};
use resolution_core::model::UserIdentity;
use services::{AppServices, Clock};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod db;

#[derive(Parser)]
#[command(
    name = "resolution",
    version,
    about = "Ten-weekend AI learning roadmap tracker"
)]
struct Cli {
    /// SQLite database URL or file path
    #[arg(
        long = "db",
        global = true,
        env = "RESOLUTION_DB_URL",
        default_value = db::DEFAULT_DB_URL
    )]
    db_url: String,

    /// Identity whose roadmap is opened
    #[arg(long, global = true, env = "RESOLUTION_USER", value_parser = parse_user)]
    user: Option<UserIdentity>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Roadmap(commands::roadmap::RoadmapAction),
    /// List identities with a saved roadmap
    Users,
    /// Suggestion provider settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn parse_user(raw: &str) -> Result<UserIdentity, resolution_core::Error> {
    Ok(UserIdentity::new(raw)?)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = db::normalize_sqlite_url(&cli.db_url)?;
    db::prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, Clock::system()).await?;

    match cli.command {
        Commands::Roadmap(action) => {
            let user = cli.user.ok_or(db::ArgsError::MissingUser)?;
            commands::roadmap::run(&services, user, action).await
        }
        Commands::Users => {
            for user in services.roadmaps().list_users().await? {
                println!("{user}");
            }
            Ok(())
        }
        Commands::Settings { action } => commands::settings::run(&services, action).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}
