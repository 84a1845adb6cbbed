use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use order_desk::cli::{
    handle_executors_command, handle_export_command, handle_log_command, handle_order_command,
    ExportFormat, OrderCommands,
};
use order_desk::config::{OrderPaths, Settings};
use order_desk::storage::open_store;

#[derive(Parser)]
#[command(
    name = "orders",
    version,
    about = "Command-line client for managing delivery orders",
    long_about = "orders manages delivery orders stored in the order service or in \
                  local JSON files. Every status change is appended to an hourly \
                  status-change log."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Order management commands
    #[command(subcommand)]
    Order(OrderCommands),

    /// List executors
    Executors,

    /// Show status changes recorded on a day
    Log {
        /// Day to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Export all orders
    Export {
        /// Export format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = OrderPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    tracing::debug!(base = %paths.base_dir().display(), backend = ?settings.backend, "Loaded settings");

    match cli.command {
        Some(Commands::Order(cmd)) => {
            let store = open_store(&settings, &paths)?;
            handle_order_command(store.as_ref(), &settings, &paths, cmd)?;
        }
        Some(Commands::Executors) => {
            let store = open_store(&settings, &paths)?;
            handle_executors_command(store.as_ref())?;
        }
        Some(Commands::Log { date }) => {
            handle_log_command(&settings, &paths, date)?;
        }
        Some(Commands::Export { format, output }) => {
            let store = open_store(&settings, &paths)?;
            handle_export_command(store.as_ref(), format, output)?;
        }
        Some(Commands::Config) => {
            println!("order-desk Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Log directory:    {}", settings.log_dir(&paths).display());
            println!();
            println!("Settings:");
            println!("  Backend:          {:?}", settings.backend);
            println!("  Service URL:      {}", settings.api_base_url);
            println!("  Request timeout:  {}s", settings.request_timeout_secs);
            println!("  Log files/day:    {}", settings.log_retention);
            println!("  Date format:      {}", settings.date_format);
        }
        None => {
            println!("orders - delivery order management");
            println!();
            println!("Run 'orders --help' for usage information.");
        }
    }

    Ok(())
}
