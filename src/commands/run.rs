//! Commands that serve chat commands: `run`, `console` and `commands`.

use std::path::Path;
use std::sync::Arc;

use owo_colors::OwoColorize;
use tokio::io::{BufReader, stdin, stdout};

use crate::config::Config;
use crate::console::run_console;
use crate::error::{Result, ZdError};
use crate::gateway::ZendeskGateway;
use crate::handler::CommandHandler;
use crate::intent::USAGE;

fn build_handler(config_path: Option<&Path>) -> Result<CommandHandler<ZendeskGateway>> {
    let config = Config::load(config_path)?;
    let gateway = ZendeskGateway::from_config(&config)?;
    CommandHandler::new(gateway, &config)
}

/// Handle a single chat command and print its replies
pub async fn cmd_run(config_path: Option<&Path>, words: &[String]) -> Result<()> {
    let command = words.join(" ");
    let handler = build_handler(config_path)?;

    let replies = handler.handle(&command).await;
    match replies {
        Some(replies) => {
            for reply in replies {
                println!("{}", reply);
            }
            Ok(())
        }
        None => Err(ZdError::UnknownCommand(command)),
    }
}

/// Serve chat commands from stdin until EOF
pub async fn cmd_console(config_path: Option<&Path>) -> Result<()> {
    let handler = Arc::new(build_handler(config_path)?);
    tracing::info!("console ready, one command per line");
    run_console(handler, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}

/// List the supported chat commands
pub fn cmd_commands() -> Result<()> {
    let width = USAGE.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    for (usage, description) in USAGE {
        println!("{:width$}  {}", usage.cyan(), description.dimmed());
    }
    Ok(())
}
