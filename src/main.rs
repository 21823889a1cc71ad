mod handlers;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::{Priority, SortKey, Status, StatusFilter, TaskPatch};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskboard", version, about = "A local task board")]
struct Cli {
    /// Data directory (default: .taskboard, or $TASKBOARD_DIR)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Initialize the task board
    Init,
    /// Add a new task
    Add {
        title: String,
        #[arg(long, short = 'd', default_value = "")]
        description: String,
        #[arg(long, short = 's', default_value = "to-do")]
        status: Status,
        #[arg(long, short = 'p', default_value = "medium")]
        priority: Priority,
    },
    /// List tasks
    List {
        /// Status to show, or "all"
        #[arg(long, short = 's', default_value = "all")]
        status: StatusFilter,
        /// Case-insensitive text to look for in titles and descriptions
        #[arg(long, short = 'q', default_value = "")]
        search: String,
        /// date-asc, date-desc, title-asc, title-desc, priority-asc, priority-desc or manual
        #[arg(long, default_value = "date-desc")]
        sort: SortKey,
        #[arg(long)]
        json: bool,
    },
    /// Show one task
    Show {
        task: String,
        /// Strict mode: require an id or id prefix (no fuzzy matching)
        #[arg(long)]
        strict: bool,
    },
    /// Edit fields of a task
    Edit {
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, short = 'd')]
        description: Option<String>,
        #[arg(long, short = 's')]
        status: Option<Status>,
        #[arg(long, short = 'p')]
        priority: Option<Priority>,
        #[arg(long)]
        strict: bool,
    },
    /// Remove a task
    Rm {
        task: String,
        #[arg(long)]
        strict: bool,
    },
    /// Swap two tasks in the stored order
    Move {
        dragged: String,
        target: String,
        #[arg(long)]
        strict: bool,
    },
    /// Show task counts per status
    Stats {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli
        .dir
        .map_or_else(StoreConfig::from_env, |dir| StoreConfig::default().with_dir(dir));

    match cli.command {
        Commands::Init
        | Commands::Add { .. }
        | Commands::Edit { .. }
        | Commands::Rm { .. }
        | Commands::Move { .. } => dispatch_write_ops(&config, cli.command),
        Commands::List { .. } | Commands::Show { .. } | Commands::Stats { .. } => {
            dispatch_read_ops(&config, cli.command)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch_write_ops(config: &StoreConfig, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init => handlers::init::handle(config),
        Commands::Add {
            title,
            description,
            status,
            priority,
        } => handlers::add::handle(config, &title, &description, status, priority),
        Commands::Edit {
            task,
            title,
            description,
            status,
            priority,
            strict,
        } => {
            let patch = TaskPatch {
                title,
                description,
                status,
                priority,
            };
            handlers::edit::handle(config, &task, &patch, strict)
        }
        Commands::Rm { task, strict } => handlers::remove::handle(config, &task, strict),
        Commands::Move {
            dragged,
            target,
            strict,
        } => handlers::move_task::handle(config, &dragged, &target, strict),
        _ => unreachable!("Invalid write command dispatch"),
    }
}

fn dispatch_read_ops(config: &StoreConfig, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List {
            status,
            search,
            sort,
            json,
        } => handlers::list::handle(config, status, &search, sort, json),
        Commands::Show { task, strict } => handlers::show::handle(config, &task, strict),
        Commands::Stats { json } => handlers::stats::handle(config, json),
        _ => unreachable!("Invalid read command dispatch"),
    }
}
