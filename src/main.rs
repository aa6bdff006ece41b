use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pivotal_fluent::{Config, Tracker};

#[derive(Parser)]
#[command(name = "ptrack")]
#[command(about = "Browse and update Pivotal Tracker projects from the terminal")]
struct Cli {
    /// API token (overrides config file and PIVOTAL_TRACKER_API_KEY)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Service root URL
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects
    Projects,
    /// Show one project with its memberships
    Project { id: u64 },
    /// List stories of a project
    Stories {
        project: u64,

        /// Service-side filter, e.g. "state:started"
        #[arg(short, long, conflicts_with_all = ["limit", "offset"])]
        filter: Option<String>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long, default_value = "0", requires = "limit")]
        offset: u32,
    },
    /// Show one story
    Story { project: u64, id: u64 },
    /// Add a note to a story
    Note {
        project: u64,
        story: u64,
        text: String,
    },
    /// Mark every finished story of a project as delivered
    Deliver { project: u64 },
    /// List the members of a project
    Members { project: u64 },
}

/// Initialize tracing with output to stderr so stdout stays pipeable JSON
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "pivotal_fluent=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load();
    if let Some(token) = cli.token {
        config.api_key = Some(token);
    }
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    let tracker = Tracker::from_config(&config).context("Failed to set up the Tracker client")?;
    let projects = tracker.projects();

    match cli.command {
        Commands::Projects => {
            let all = projects.all().await?;
            let items: Vec<_> = all.iter().filter_map(|p| p.item()).collect();
            print_json(&items)?;
        }
        Commands::Project { id } => {
            let project = projects.get(id).await?;
            print_json(&project.item())?;
        }
        Commands::Stories {
            project,
            filter,
            limit,
            offset,
        } => {
            let stories = projects.get(project).await?.stories();
            let found = match (filter, limit) {
                (Some(expr), _) => stories.filter(&expr).await?,
                (None, Some(limit)) => stories.some(offset, limit).await?,
                (None, None) => stories.all().await?,
            };
            tracing::info!(project_id = project, count = found.len(), "stories loaded");
            print_json(found.items())?;
        }
        Commands::Story { project, id } => {
            let story = projects.get(project).await?.stories().get(id).await?;
            print_json(&story.item())?;
        }
        Commands::Note {
            project,
            story,
            text,
        } => {
            let story = projects
                .get(project)
                .await?
                .stories()
                .get(story)
                .await?
                .add_note(&text)
                .await?;
            print_json(&story.item().and_then(|s| s.notes.last()))?;
        }
        Commands::Deliver { project } => {
            projects
                .get(project)
                .await?
                .deliver_all_finished_stories()
                .await?;
            tracing::info!(project_id = project, "finished stories delivered");
        }
        Commands::Members { project } => {
            let members = projects.get(project).await?.memberships().all().await?;
            print_json(&members)?;
        }
    }

    Ok(())
}
