//! Command matching.
//!
//! Incoming chat text is tried against an ordered rule list; the first rule
//! whose pattern matches and whose captures build a valid [`Intent`] wins.
//! Every command needs the `zd` or `zendesk` prefix and matching ignores case.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::catalog::StatusKey;

/// What a matched command asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ConnectionInfo,
    Search { query: String },
    CountByStatus(StatusKey),
    ListByStatus(StatusKey),
    TicketDetail(u64),
}

impl Intent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::ConnectionInfo => "connection",
            Intent::Search { .. } => "search",
            Intent::CountByStatus(_) => "count",
            Intent::ListByStatus(_) => "list",
            Intent::TicketDetail(_) => "ticket",
        }
    }
}

const PREFIX: &str = r"(?i)^(?:zd|zendesk)";
const STATUS_WORDS: &str = r"(all|total|pending|new|escalated|open|on\s+hold)";

struct Rule {
    regex: Regex,
    build: fn(&Captures<'_>) -> Option<Intent>,
}

impl Rule {
    fn new(pattern: &str, build: fn(&Captures<'_>) -> Option<Intent>) -> Self {
        let regex = Regex::new(&format!("{PREFIX}{pattern}")).expect("intent regex should compile");
        Self { regex, build }
    }
}

/// Ordered rules. Bare `zd tickets` is tried before the status-word rules and
/// the `list` rules come after the count rules, so no rule can consume a
/// command meant for another.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"\s+connection\s*$", |_| Some(Intent::ConnectionInfo)),
        Rule::new(r"\s+search\s+tickets?\s+(\S.*?)\s*$", |caps| {
            let query = caps.get(1)?.as_str().trim();
            (!query.is_empty()).then(|| Intent::Search {
                query: query.to_string(),
            })
        }),
        Rule::new(r"(?:\s+unsolved)?\s+tickets?\s*$", |_| {
            Some(Intent::CountByStatus(StatusKey::Unsolved))
        }),
        Rule::new(&format!(r"\s+{STATUS_WORDS}\s+tickets?\s*$"), |caps| {
            StatusKey::from_word(caps.get(1)?.as_str()).map(Intent::CountByStatus)
        }),
        Rule::new(r"\s+list(?:\s+unsolved)?\s+tickets?\s*$", |_| {
            Some(Intent::ListByStatus(StatusKey::Unsolved))
        }),
        Rule::new(&format!(r"\s+list\s+{STATUS_WORDS}\s+tickets?\s*$"), |caps| {
            StatusKey::from_word(caps.get(1)?.as_str()).map(Intent::ListByStatus)
        }),
        Rule::new(r"\s+ticket\s+(\S+)\s*$", |caps| {
            parse_ticket_id(caps.get(1)?.as_str()).map(Intent::TicketDetail)
        }),
    ]
});

/// Match a command against the rule list. `None` means the command is not
/// for this bot, including a recognized shape with a malformed parameter.
pub fn match_command(command: &str) -> Option<Intent> {
    RULES.iter().find_map(|rule| {
        rule.regex
            .captures(command)
            .and_then(|caps| (rule.build)(&caps))
    })
}

/// Ticket ids are positive integers written with ASCII digits only
fn parse_ticket_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok().filter(|id| *id > 0)
}

/// Usage and description for every supported command
pub const USAGE: &[(&str, &str)] = &[
    ("zd connection", "returns information on the Zendesk connection"),
    ("zd search tickets <QUERY>", "returns search results"),
    ("zd tickets", "returns the total count of all unsolved tickets"),
    ("zd all tickets", "returns the count of all tickets"),
    ("zd pending tickets", "returns a count of tickets that are pending"),
    ("zd new tickets", "returns the count of all new (unassigned) tickets"),
    (
        "zd escalated tickets",
        "returns a count of tickets with escalated tag that are open or pending",
    ),
    ("zd open tickets", "returns the count of all open tickets"),
    ("zd on hold tickets", "returns the count of all on hold tickets"),
    ("zd list tickets", "returns a list of unsolved tickets"),
    ("zd list all tickets", "returns a list of all tickets"),
    ("zd list pending tickets", "returns a list of pending tickets"),
    ("zd list new tickets", "returns a list of new tickets"),
    ("zd list escalated tickets", "returns a list of escalated tickets"),
    ("zd list open tickets", "returns a list of open tickets"),
    ("zd list on hold tickets", "returns a list of on hold tickets"),
    ("zd ticket <ID>", "returns information about the specified ticket"),
];
