use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use zdbot::commands::{cmd_commands, cmd_config_show, cmd_console, cmd_run};

#[derive(Parser)]
#[command(name = "zdbot")]
#[command(about = "Chat commands for querying Zendesk tickets")]
#[command(version)]
struct Cli {
    /// Path to the config file (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log backend requests (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read chat commands from stdin, one per line (default)
    Console,

    /// Handle a single chat command, e.g. `zdbot run zd open tickets`
    Run {
        /// Command words
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// List the supported chat commands
    Commands,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration (credentials masked)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "zdbot=debug" } else { "zdbot=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config.as_deref();

    let result = match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => cmd_console(config).await,
        Commands::Run { words } => cmd_run(config, &words).await,
        Commands::Commands => cmd_commands(),
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(config, json),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
