//! Line-oriented chat surface.
//!
//! Reads one command per line and writes each command's replies as a single
//! contiguous block. Commands run as independent tasks, so a slow backend
//! call for one command does not hold up the others.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::Result;
use crate::gateway::TicketGateway;
use crate::handler::CommandHandler;
use crate::intent::USAGE;

/// `<usage> - <description>` for every supported command
pub fn help_lines() -> Vec<String> {
    USAGE
        .iter()
        .map(|(usage, description)| format!("{} - {}", usage, description))
        .collect()
}

/// Serve commands from `input` until EOF or `quit`, writing replies to `output`.
///
/// Waits for every in-flight command before returning the writer.
pub async fn run_console<G, R, W>(
    handler: Arc<CommandHandler<G>>,
    input: R,
    output: W,
) -> Result<W>
where
    G: TicketGateway + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<Vec<String>>();
    let writer = tokio::spawn(write_replies(rx, output));

    let mut in_flight = JoinSet::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = line.trim().to_string();
        match command.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                let _ = tx.send(help_lines());
                continue;
            }
            _ => {}
        }

        let handler = Arc::clone(&handler);
        let tx = tx.clone();
        in_flight.spawn(async move {
            match handler.handle(&command).await {
                Some(replies) => {
                    let _ = tx.send(replies);
                }
                None => tracing::debug!(%command, "no matching command"),
            }
        });
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("command task failed: {e}");
        }
    }
    drop(tx);

    match writer.await {
        Ok(result) => result,
        Err(e) => Err(std::io::Error::other(e).into()),
    }
}

async fn write_replies<W>(mut rx: mpsc::UnboundedReceiver<Vec<String>>, mut output: W) -> Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(replies) = rx.recv().await {
        for reply in replies {
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        output.flush().await?;
    }
    Ok(output)
}
