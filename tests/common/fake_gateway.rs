//! In-memory `TicketGateway` that records every call.

use std::sync::Mutex;

use zdbot::{
    AuditEvent, AuditRecord, Person, Result, SearchResult, TicketDetail, TicketGateway,
    TicketSummary, ZdError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Count(String),
    Search(String, usize),
    Ticket(u64),
    Audits(u64),
}

#[derive(Default)]
pub struct FakeGateway {
    pub count: u64,
    /// Every hit the backend knows about; `search` pages it like Zendesk does
    pub hits: Vec<TicketSummary>,
    /// Overrides the reported total (defaults to `hits.len()`)
    pub total: Option<u64>,
    /// Return every hit regardless of the requested limit
    pub ignore_limit: bool,
    pub ticket: Option<TicketDetail>,
    pub history: Vec<AuditRecord>,
    pub fail_with: Option<fn() -> ZdError>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }
}

impl TicketGateway for FakeGateway {
    async fn count_matching(&self, fragment: &str) -> Result<u64> {
        self.record(Call::Count(fragment.to_string()))?;
        Ok(self.count)
    }

    async fn search(&self, fragment: &str, limit: usize) -> Result<SearchResult> {
        self.record(Call::Search(fragment.to_string(), limit))?;
        let take = if self.ignore_limit { usize::MAX } else { limit };
        Ok(SearchResult {
            tickets: self.hits.iter().take(take).cloned().collect(),
            total: self.total.unwrap_or(self.hits.len() as u64),
        })
    }

    async fn get_ticket(&self, id: u64) -> Result<TicketDetail> {
        self.record(Call::Ticket(id))?;
        self.ticket
            .clone()
            .filter(|t| t.summary.id == id)
            .ok_or(ZdError::TicketNotFound(id))
    }

    async fn get_audit_history(&self, id: u64) -> Result<Vec<AuditRecord>> {
        self.record(Call::Audits(id))?;
        Ok(self.history.clone())
    }
}

pub fn summary(id: u64, status: &str, subject: &str) -> TicketSummary {
    TicketSummary {
        id,
        status: status.to_string(),
        subject: subject.to_string(),
        url: format!("https://acme.zendesk.com/tickets/{id}"),
    }
}

pub fn open_hits(count: u64) -> Vec<TicketSummary> {
    (1..=count)
        .map(|id| summary(id, "open", &format!("Issue {id}")))
        .collect()
}

pub fn comment_record(created_at: &str, author: Person, body: &str) -> AuditRecord {
    AuditRecord {
        created_at: created_at.to_string(),
        events: vec![AuditEvent {
            kind: "Comment".to_string(),
            author: Some(author),
            body: Some(body.to_string()),
        }],
    }
}

pub fn change_record(created_at: &str) -> AuditRecord {
    AuditRecord {
        created_at: created_at.to_string(),
        events: vec![AuditEvent {
            kind: "Change".to_string(),
            author: None,
            body: None,
        }],
    }
}
