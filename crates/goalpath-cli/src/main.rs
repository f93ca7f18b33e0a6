mod config;
mod goal_cmds;
mod output;
mod plan_cmds;
mod serve_cmd;
mod status_cmd;
mod task_cmds;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};

use goalpath_core::board::GoalBoard;
use goalpath_core::plan::GenerationOptions;
use goalpath_core::strategy::StrategyKind;
use goalpath_store::file_store::JsonFileStore;
use goalpath_store::models::{GoalStatus, Priority};

use config::GoalpathConfig;

#[derive(Parser)]
#[command(name = "goalpath", about = "Plan goals day by day and track your progress")]
struct Cli {
    /// Data directory (overrides GOALPATH_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Plan service endpoint (overrides GOALPATH_AI_ENDPOINT env var)
    #[arg(long, global = true)]
    ai_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a goalpath config file
    Init {
        /// Plan service endpoint to record in the config
        #[arg(long)]
        endpoint: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Goal management
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Analyze goals, compare strategies, and (re)generate plans
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Task views and completion
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show the dashboard summary
    Status,
    /// Serve a JSON API over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 3030)]
        port: u16,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Schedule shaping flags shared by commands that generate plans.
///
/// Unset flags fall back to the `[planning]` section of the config file.
#[derive(Args, Debug, Default)]
pub struct PlanFlags {
    /// Skip Saturdays and Sundays
    #[arg(long)]
    skip_weekends: bool,
    /// Insert a rest day after every N working days
    #[arg(long, value_name = "N")]
    break_every: Option<u32>,
    /// Add a review milestone every N scheduled days
    #[arg(long, value_name = "N")]
    milestone_every: Option<u32>,
}

impl PlanFlags {
    pub fn apply(&self, base: GenerationOptions) -> GenerationOptions {
        let mut opts = base;
        if self.skip_weekends {
            opts = opts.with_weekends_skipped();
        }
        if let Some(n) = self.break_every {
            opts = opts.with_break_days(n);
        }
        if let Some(n) = self.milestone_every {
            opts = opts.with_milestones(n);
        }
        opts
    }
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a goal and generate its daily plan
    Add {
        /// Goal title
        title: String,
        /// First day (YYYY-MM-DD, default today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD); conflicts with --days
        #[arg(long, conflicts_with = "days")]
        end: Option<NaiveDate>,
        /// Number of days including the first
        #[arg(long, default_value_t = 30)]
        days: u32,
        /// Minutes per day
        #[arg(long, default_value_t = 60)]
        minutes: u32,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// low, medium, or high
        #[arg(long)]
        priority: Option<Priority>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Create the goal without tasks
        #[arg(long)]
        no_plan: bool,
        #[command(flatten)]
        flags: PlanFlags,
    },
    /// List goals
    List {
        /// Only goals with this status
        #[arg(long)]
        status: Option<GoalStatus>,
    },
    /// Show a goal with its tasks and progress
    Show {
        /// Goal ID or unique prefix
        id: String,
    },
    /// Edit a goal
    Edit {
        /// Goal ID or unique prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        priority: Option<Priority>,
        /// Replace tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        /// Rebuild the plan from the edited goal (drops completion state)
        #[arg(long)]
        regenerate: bool,
        #[command(flatten)]
        flags: PlanFlags,
    },
    /// Set a goal's status
    Status {
        /// Goal ID or unique prefix
        id: String,
        /// active, completed, or paused
        status: GoalStatus,
    },
    /// Delete a goal and all of its tasks
    Delete {
        /// Goal ID or unique prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Describe a goal in words and compare the four strategies
    Analyze {
        /// Free-text goal, e.g. "learn Spanish in 3 weeks, 45 minutes a day"
        #[arg(required = true, num_args = 1..)]
        goal: Vec<String>,
        /// Do not contact the plan service
        #[arg(long)]
        offline: bool,
        /// Print strategies as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze a goal and save it with the chosen strategy
    Accept {
        /// Free-text goal
        #[arg(required = true, num_args = 1..)]
        goal: Vec<String>,
        /// step-by-step, progressive-load, milestone, or time-blocked
        #[arg(long, default_value = "step-by-step")]
        strategy: StrategyKind,
        /// First day (YYYY-MM-DD, default today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Do not contact the plan service
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Replace a goal's tasks with a freshly generated plan
    Regenerate {
        /// Goal ID or unique prefix
        id: String,
        #[command(flatten)]
        flags: PlanFlags,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks, optionally for one goal
    List {
        /// Goal ID or unique prefix
        goal: Option<String>,
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Tasks scheduled for today
    Today,
    /// Incomplete tasks from earlier days
    Overdue,
    /// Incomplete tasks in the next N days
    Upcoming {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Mark a task complete
    Done {
        /// Task ID or unique prefix
        id: String,
    },
    /// Mark a task incomplete
    Undo {
        /// Task ID or unique prefix
        id: String,
    },
    /// Delete a single task
    Delete {
        /// Task ID or unique prefix
        id: String,
    },
}

/// Execute the `goalpath init` command: write config file.
fn cmd_init(
    path: &Path,
    data_dir: Option<&Path>,
    endpoint: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        storage: config::StorageSection {
            data_dir: data_dir.map(Path::to_path_buf),
        },
        ai: config::AiSection {
            endpoint: endpoint.map(str::to_string),
            ..config::AiSection::default()
        },
        planning: GenerationOptions::default(),
    };
    config::save_config_to(path, &cfg)?;

    println!("Config written to {}", path.display());
    match endpoint {
        Some(url) => println!("  ai.endpoint = {url}"),
        None => println!("  ai.endpoint not set; goal analysis runs offline"),
    }
    if let Some(dir) = data_dir {
        println!("  storage.data_dir = {}", dir.display());
    }
    println!();
    println!("Next: run `goalpath plan analyze \"<your goal>\"`.");

    Ok(())
}

/// Open the JSON store and load the board.
fn open_board(config: &GoalpathConfig) -> anyhow::Result<GoalBoard> {
    let store = JsonFileStore::open(&config.store_config).with_context(|| {
        format!(
            "failed to open data directory {}",
            config.store_config.data_dir().display()
        )
    })?;
    GoalBoard::load(Box::new(store)).context("failed to load saved goals")
}

/// Print any unsaved-write notice left by the last mutation.
fn report_notice(board: &mut GoalBoard) {
    if let Some(notice) = board.take_notice() {
        eprintln!("warning: changes were not saved: {}", notice.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let Cli {
        data_dir,
        ai_endpoint,
        command,
    } = Cli::parse();
    let resolve_config = || GoalpathConfig::resolve(data_dir.as_deref(), ai_endpoint.as_deref());

    match command {
        Commands::Init { endpoint, force } => {
            cmd_init(
                &config::config_path(),
                data_dir.as_deref(),
                endpoint.as_deref(),
                force,
            )?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "goalpath",
                &mut std::io::stdout(),
            );
        }
        Commands::Goal { command } => {
            let resolved = resolve_config()?;
            let mut board = open_board(&resolved)?;
            let result = goal_cmds::run_goal_command(command, &mut board, &resolved);
            report_notice(&mut board);
            result?;
        }
        Commands::Plan { command } => {
            let resolved = resolve_config()?;
            let mut board = open_board(&resolved)?;
            let result = plan_cmds::run_plan_command(command, &mut board, &resolved).await;
            report_notice(&mut board);
            result?;
        }
        Commands::Task { command } => {
            let resolved = resolve_config()?;
            let mut board = open_board(&resolved)?;
            let result = task_cmds::run_task_command(command, &mut board);
            report_notice(&mut board);
            result?;
        }
        Commands::Status => {
            let resolved = resolve_config()?;
            let board = open_board(&resolved)?;
            status_cmd::run_status(&board);
        }
        Commands::Serve { bind, port } => {
            let resolved = resolve_config()?;
            let board = open_board(&resolved)?;
            serve_cmd::run_serve(board, &bind, port).await?;
        }
    }

    Ok(())
}
