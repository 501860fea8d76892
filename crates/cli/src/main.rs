use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use printify_agent_cli::{completions, display, interactive, oneshot};
use printify_agent_common::{init_tracing_with_level, SystemConfig};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "printify-agent")]
#[command(version)]
#[command(about = "Guided print-on-demand product selection")]
struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the blueprint catalog once and print the shortlist
    Search {
        /// Free-text product description
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the structured reply as JSON
        #[arg(long)]
        json: bool,
    },
    /// Walk the selection funnel interactively (default)
    Chat,
    /// Validate configuration
    ValidateConfig,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        completions::generate(shell, &mut Cli::command());
        return Ok(());
    }

    let config = SystemConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let log_level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing_with_level(log_level)?;
    info!("printify-agent v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Some(Commands::ValidateConfig) => {
            println!("{}", display::format_config(&config));
            Ok(())
        }
        Some(Commands::Search { query, json }) => {
            oneshot::execute(&config, &query.join(" "), json).await
        }
        Some(Commands::Chat) | None => interactive::run(&config).await,
        Some(Commands::Completions { .. }) => Ok(()),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
