//! Command pipeline: match, query, call the backend, format.
//!
//! [`CommandHandler::handle`] is the single entry point a chat host wires into
//! its dispatch loop. Each call is independent; any backend failure becomes
//! exactly one reply for that command.

use crate::catalog::search_query;
use crate::comments::extract_comments;
use crate::config::Config;
use crate::error::{Result, ZdError};
use crate::format;
use crate::gateway::TicketGateway;
use crate::intent::{Intent, match_command};

pub const BACKEND_ERROR_REPLY: &str = "Error processing request, please try again later.";

pub struct CommandHandler<G> {
    gateway: G,
    base_url: String,
    display_limit: usize,
}

impl<G: TicketGateway> CommandHandler<G> {
    pub fn new(gateway: G, config: &Config) -> Result<Self> {
        Ok(Self {
            gateway,
            base_url: config.base_url_string()?,
            display_limit: config.display_limit,
        })
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Replies for a command, in send order. `None` if the command is not ours.
    pub async fn handle(&self, command: &str) -> Option<Vec<String>> {
        let intent = match_command(command)?;
        tracing::info!(intent = intent.name(), "handling command");
        Some(self.dispatch(&intent).await)
    }

    /// Run a matched intent; never fails, errors are rendered as a reply
    pub async fn dispatch(&self, intent: &Intent) -> Vec<String> {
        match self.execute(intent).await {
            Ok(replies) => replies,
            Err(error) => {
                tracing::warn!(intent = intent.name(), %error, "backend request failed");
                vec![error_reply(intent, &error)]
            }
        }
    }

    async fn execute(&self, intent: &Intent) -> Result<Vec<String>> {
        match intent {
            Intent::ConnectionInfo => Ok(vec![format::connection_reply(&self.base_url)]),
            Intent::CountByStatus(key) => {
                let count = self.gateway.count_matching(key.fragment()).await?;
                Ok(vec![format::count_reply(count, key.label())])
            }
            Intent::ListByStatus(key) => {
                let result = self
                    .gateway
                    .search(key.fragment(), self.display_limit)
                    .await?;
                Ok(format::list_reply(&result, self.display_limit, key.label()))
            }
            Intent::Search { query } => {
                let result = self
                    .gateway
                    .search(&search_query(query), self.display_limit)
                    .await?;
                Ok(format::search_reply(&result, self.display_limit, query))
            }
            Intent::TicketDetail(id) => {
                let ticket = self.gateway.get_ticket(*id).await?;
                let history = self.gateway.get_audit_history(*id).await?;
                let comments = extract_comments(&history);
                Ok(vec![format::detail_reply(&ticket, &comments)])
            }
        }
    }
}

/// The user-facing text for a failed command
pub fn error_reply(intent: &Intent, error: &ZdError) -> String {
    match (intent, error) {
        (Intent::TicketDetail(id), e) if e.is_not_found() => {
            format!("Error processing ticket {}", id)
        }
        _ => BACKEND_ERROR_REPLY.to_string(),
    }
}
