use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use finpulse::cli::{
    handle_alerts, handle_category_command, handle_goal_command, handle_history, handle_report,
    handle_target_command, handle_transaction_command,
};
use finpulse::config::{paths::DATA_DIR_ENV, FinpulsePaths, Settings};
use finpulse::logging::init_tracing;
use finpulse::storage::{init::initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finpulse",
    version,
    about = "Track budget targets and saving goals from the terminal",
    long_about = "finpulse records income and expenses, evaluates spending \
                  targets and saving goals against them, and reports what \
                  needs attention."
)]
struct Cli {
    /// Log what the services do (info level) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding settings, data and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create settings and starter categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Category management commands
    #[command(subcommand)]
    Category(finpulse::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(finpulse::cli::TransactionCommands),

    /// Budget target commands
    #[command(subcommand)]
    Target(finpulse::cli::TargetCommands),

    /// Saving goal commands
    #[command(subcommand)]
    Goal(finpulse::cli::GoalCommands),

    /// Dashboard with targets, goals, categories, trend and alerts
    Report {
        /// First day of the trend window (YYYY-MM-DD), defaults to the start of this month
        #[arg(long)]
        from: Option<String>,
        /// Last day of the trend window (YYYY-MM-DD), defaults to the end of this month
        #[arg(long)]
        to: Option<String>,
    },

    /// Targets and goals that need attention
    Alerts,

    /// Recent changes from the audit log
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = match cli.data_dir {
        Some(dir) => FinpulsePaths::with_base_dir(dir),
        None => FinpulsePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("finpulse - budget targets and saving goals");
            println!();
            println!("Run 'finpulse --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            let fresh = !paths.is_initialized();
            settings.save(&paths)?;
            let created = initialize_storage(&paths, settings.user_id)?;
            if fresh {
                println!("Initialized finpulse at: {}", paths.base_dir().display());
            } else {
                println!("finpulse is already initialized at: {}", paths.base_dir().display());
            }
            if created > 0 {
                println!("Created {} starter categories.", created);
                println!("Run 'finpulse category list' to see them.");
            }
        }
        Commands::Config => {
            println!("finpulse Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Profile:            {}", settings.user_id);
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Warning threshold:  {}%", settings.thresholds.warning_percentage);
            println!("  Deadline window:    {} days", settings.thresholds.goal_deadline_window_days);
        }
        Commands::Category(cmd) => handle_category_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Txn(cmd) => handle_transaction_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Target(cmd) => handle_target_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Report { from, to } => {
            handle_report(&open_storage(paths)?, &settings, from.as_deref(), to.as_deref())?
        }
        Commands::Alerts => handle_alerts(&open_storage(paths)?, &settings)?,
        Commands::History { limit } => handle_history(&open_storage(paths)?, limit)?,
    }

    Ok(())
}

/// Load storage, refusing to run before `finpulse init`
fn open_storage(paths: FinpulsePaths) -> Result<Storage> {
    if !paths.is_initialized() {
        bail!("finpulse is not initialized; run 'finpulse init' first");
    }
    Ok(Storage::open(paths)?)
}
