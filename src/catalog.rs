//! Ticket status catalog.
//!
//! Maps each status word a user can ask about to the Zendesk search query
//! that selects it. Several `status:` terms in one query are ORed together by
//! Zendesk, which is what makes `escalated` cover both open and pending
//! tickets.

use std::fmt;

/// Prefix shared by every ticket search
pub const TICKET_TYPE: &str = "type:ticket";

/// A status category a command can count or list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKey {
    /// Every ticket regardless of status (`all` or `total`)
    All,
    Escalated,
    OnHold,
    Open,
    New,
    Pending,
    /// Any status before solved; the default when no status word is given
    Unsolved,
}

/// Display label and backend query for one catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusQuery {
    pub label: &'static str,
    pub fragment: &'static str,
}

impl StatusKey {
    pub const ALL: [StatusKey; 7] = [
        StatusKey::All,
        StatusKey::Escalated,
        StatusKey::OnHold,
        StatusKey::Open,
        StatusKey::New,
        StatusKey::Pending,
        StatusKey::Unsolved,
    ];

    /// The catalog entry for this key. Exhaustive, so every key has one.
    pub const fn query(self) -> StatusQuery {
        match self {
            StatusKey::All => StatusQuery {
                label: "total",
                fragment: "type:ticket",
            },
            StatusKey::Escalated => StatusQuery {
                label: "escalated",
                fragment: "type:ticket tags:escalated status:open status:pending",
            },
            StatusKey::OnHold => StatusQuery {
                label: "on hold",
                fragment: "type:ticket status:hold",
            },
            StatusKey::Open => StatusQuery {
                label: "open",
                fragment: "type:ticket status:open",
            },
            StatusKey::New => StatusQuery {
                label: "new",
                fragment: "type:ticket status:new",
            },
            StatusKey::Pending => StatusQuery {
                label: "pending",
                fragment: "type:ticket status:pending",
            },
            StatusKey::Unsolved => StatusQuery {
                label: "unsolved",
                fragment: "type:ticket status<solved",
            },
        }
    }

    pub const fn label(self) -> &'static str {
        self.query().label
    }

    pub const fn fragment(self) -> &'static str {
        self.query().fragment
    }

    /// Resolve a status word as typed in a command (`on hold` may contain
    /// any run of whitespace). Case-insensitive.
    pub fn from_word(word: &str) -> Option<Self> {
        let normalized = word.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_lowercase().as_str() {
            "all" | "total" => Some(StatusKey::All),
            "escalated" => Some(StatusKey::Escalated),
            "on hold" => Some(StatusKey::OnHold),
            "open" => Some(StatusKey::Open),
            "new" => Some(StatusKey::New),
            "pending" => Some(StatusKey::Pending),
            "unsolved" => Some(StatusKey::Unsolved),
            _ => None,
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Build the backend query for a free-text ticket search
pub fn search_query(text: &str) -> String {
    format!("{} {}", TICKET_TYPE, text.trim())
}
