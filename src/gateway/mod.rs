//! Ticketing backend access.
//!
//! The command pipeline only talks to the backend through [`TicketGateway`],
//! which keeps it testable without a network and leaves transport, auth and
//! pagination details to the implementation.

pub mod zendesk;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use zendesk::ZendeskGateway;

/// One search or list hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub id: u64,
    pub status: String,
    pub subject: String,
    /// Agent-facing web URL of the ticket
    pub url: String,
}

/// Person attached to a ticket or comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Person {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            email: None,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }
}

/// Full ticket record used by the detail reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDetail {
    pub summary: TicketSummary,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    pub requester: Option<Person>,
}

/// A single event inside an audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Backend event type tag, e.g. `Comment` or `Change`
    pub kind: String,
    pub author: Option<Person>,
    pub body: Option<String>,
}

/// One entry of a ticket's history; may carry several events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub created_at: String,
    pub events: Vec<AuditEvent>,
}

/// A page of hits plus the backend-side total, which may exceed `tickets.len()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub tickets: Vec<TicketSummary>,
    pub total: u64,
}

/// Read-only operations the command pipeline needs from the backend
pub trait TicketGateway: Send + Sync {
    /// Number of tickets selected by a query fragment
    fn count_matching(
        &self,
        fragment: &str,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// At most `limit` hits for a query fragment, with the true total
    fn search(
        &self,
        fragment: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<SearchResult>> + Send;

    /// A single ticket; fails with `ZdError::TicketNotFound` for unknown ids
    fn get_ticket(&self, id: u64)
    -> impl std::future::Future<Output = Result<TicketDetail>> + Send;

    /// A ticket's audit records in chronological order
    fn get_audit_history(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = Result<Vec<AuditRecord>>> + Send;
}
