//! Comment thread reconstruction from a ticket's audit history.

use unicase::UniCase;

use crate::gateway::{AuditRecord, Person};

/// Shown when an event has neither an author name nor an email
const UNKNOWN_AUTHOR: &str = "Unknown";

/// One rendered comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    pub author: String,
    pub created_at: String,
    pub body: String,
}

/// Pull the comments out of a chronological audit history, newest first.
///
/// Only the first comment event of each audit record is used; records
/// without one contribute nothing.
pub fn extract_comments(history: &[AuditRecord]) -> Vec<CommentEntry> {
    let mut comments: Vec<CommentEntry> = history
        .iter()
        .filter_map(|record| {
            let event = record.events.iter().find(|e| is_comment(&e.kind))?;
            Some(CommentEntry {
                author: author_display(event.author.as_ref()),
                created_at: record.created_at.clone(),
                body: event.body.clone().unwrap_or_default(),
            })
        })
        .collect();

    comments.reverse();
    comments
}

fn is_comment(kind: &str) -> bool {
    UniCase::new(kind) == UniCase::new("comment")
}

/// `name (email)`, or whichever of the two is present.
///
/// The email is dropped when it is exactly equal to the name.
pub fn author_display(person: Option<&Person>) -> String {
    let Some(person) = person else {
        return UNKNOWN_AUTHOR.to_string();
    };
    let name = person.name.as_deref().filter(|s| !s.is_empty());
    let email = person.email.as_deref().filter(|s| !s.is_empty());

    match (name, email) {
        (Some(name), Some(email)) if name != email => format!("{} ({})", name, email),
        (Some(name), _) => name.to_string(),
        (None, Some(email)) => email.to_string(),
        (None, None) => UNKNOWN_AUTHOR.to_string(),
    }
}
