use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard::board::BoardSession;
use taskboard::config::BoardConfig;
use taskboard::db::Database;
use taskboard::models::{Stage, TaskId, TaskUpdate};
use taskboard::render::{render_board, PrintObserver};

#[derive(Parser)]
#[command(name = "board")]
#[command(about = "Single-user task board: planning, development, qa, deployment")]
struct Cli {
    /// SQLite file holding the board (overrides config and TASKBOARD_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a task
    Add {
        title: String,
        #[arg(short, long)]
        description: String,
        #[arg(short, long, default_value = "planning")]
        stage: Stage,
    },
    /// Print the board
    List,
    /// Change the title and/or description of a task
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Move a task to another stage
    Move { id: String, stage: String },
    /// Delete a task
    Delete { id: String },
}

/// Initialize tracing on stderr so stdout only carries the board.
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = BoardConfig::load();
    init_tracing(&config.log_filter);
    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {:#}", e);
    }

    let path = match cli.db {
        Some(path) => path,
        None => config.database_path()?,
    };

    let db = Database::open(path.clone())
        .with_context(|| format!("Failed to open board database {}", path.display()))?;
    db.migrate()?;

    let mut session = BoardSession::open(db)?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => print!("{}", render_board(session.board())),
        Commands::Add {
            title,
            description,
            stage,
        } => {
            if title.trim().is_empty() || description.trim().is_empty() {
                anyhow::bail!("Both a title and a description are required");
            }
            session.subscribe(PrintObserver);
            let id = session.create_task(title, description, stage)?;
            tracing::info!("Created task {}", id);
        }
        Commands::Edit {
            id,
            title,
            description,
        } => {
            let update = TaskUpdate {
                title,
                description,
                stage: None,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to edit: pass --title and/or --description");
            }
            session.subscribe(PrintObserver);
            if !session.edit_task(&TaskId::new(id.clone()), update)? {
                anyhow::bail!("No task with id {}", id);
            }
        }
        Commands::Move { id, stage } => {
            session.subscribe(PrintObserver);
            if !session.change_stage(&TaskId::new(id.clone()), &stage)? {
                anyhow::bail!("No task with id {}", id);
            }
        }
        Commands::Delete { id } => {
            session.subscribe(PrintObserver);
            if !session.delete_task(&TaskId::new(id.clone()))? {
                anyhow::bail!("No task with id {}", id);
            }
        }
    }

    Ok(())
}
