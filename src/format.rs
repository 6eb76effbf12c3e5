//! Chat reply formatting.
//!
//! Every function here is pure: it takes backend data and returns the exact
//! message text to send. List-style replies return one message per ticket
//! followed by a single summary message.

use jiff::Timestamp;

use crate::comments::{CommentEntry, author_display};
use crate::gateway::{SearchResult, TicketDetail, TicketSummary};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const DESCRIPTION_RULE: &str = "-----";

/// `singular` for exactly one, otherwise `singular` + "s"
pub fn pluralize(count: u64, singular: &str) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        format!("{}s", singular)
    }
}

/// Label followed by a space, or nothing for an empty label
fn label_prefix(label: &str) -> String {
    if label.is_empty() {
        String::new()
    } else {
        format!("{} ", label)
    }
}

pub fn connection_reply(base_url: &str) -> String {
    format!("Using Zendesk instance at: {}", base_url)
}

/// e.g. `3 escalated tickets.`
pub fn count_reply(count: u64, label: &str) -> String {
    format!(
        "{} {}{}.",
        count,
        label_prefix(label),
        pluralize(count, "ticket")
    )
}

pub fn ticket_line(ticket: &TicketSummary) -> String {
    format!(
        "Ticket {} is {}: {} - {}",
        ticket.id, ticket.status, ticket.url, ticket.subject
    )
}

/// Lines actually displayed: capped by the display limit and the reported total
fn displayed<'a>(result: &'a SearchResult, limit: usize) -> &'a [TicketSummary] {
    let total = usize::try_from(result.total).unwrap_or(usize::MAX);
    let shown = result.tickets.len().min(limit).min(total);
    &result.tickets[..shown]
}

/// Ticket lines for a status listing plus `Listing <shown> of <total> <label> tickets.`
pub fn list_reply(result: &SearchResult, limit: usize, label: &str) -> Vec<String> {
    let shown = displayed(result, limit);
    let mut lines: Vec<String> = shown.iter().map(ticket_line).collect();
    lines.push(format!(
        "Listing {} of {} {}{}.",
        shown.len(),
        result.total,
        label_prefix(label),
        pluralize(result.total, "ticket")
    ));
    lines
}

/// Ticket lines for a search plus `Listing <shown> of <total> results matching <query>.`
pub fn search_reply(result: &SearchResult, limit: usize, query: &str) -> Vec<String> {
    let shown = displayed(result, limit);
    let mut lines: Vec<String> = shown.iter().map(ticket_line).collect();
    lines.push(format!(
        "Listing {} of {} {} matching {}.",
        shown.len(),
        result.total,
        pluralize(result.total, "result"),
        query
    ));
    lines
}

/// Render an ISO 8601 timestamp in UTC; anything unparsable is returned as is
pub fn format_timestamp(raw: &str) -> String {
    match raw.parse::<Timestamp>() {
        Ok(ts) => ts.strftime(TIMESTAMP_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Multi-line ticket detail block, with the comment thread (newest first) appended
pub fn detail_reply(ticket: &TicketDetail, comments: &[CommentEntry]) -> String {
    let summary = &ticket.summary;
    let mut lines = vec![
        format!("Ticket {}: {}", summary.id, summary.url),
        format!("Subject: {}", summary.subject),
        format!("Status: {}", summary.status.to_uppercase()),
        format!("Updated: {}", format_timestamp(&ticket.updated_at)),
        format!("Created: {}", format_timestamp(&ticket.created_at)),
        format!("Requester: {}", author_display(ticket.requester.as_ref())),
        "Description:".to_string(),
        DESCRIPTION_RULE.to_string(),
        ticket.description.trim_end().to_string(),
        DESCRIPTION_RULE.to_string(),
    ];

    if !comments.is_empty() {
        lines.push(String::new());
        lines.push("Comments:".to_string());
        let thread: Vec<String> = comments.iter().map(comment_block).collect();
        lines.push(thread.join("\n\n"));
    }

    lines.join("\n")
}

fn comment_block(comment: &CommentEntry) -> String {
    format!(
        "[{}] {}:\n{}",
        format_timestamp(&comment.created_at),
        comment.author,
        comment.body.trim_end()
    )
}
