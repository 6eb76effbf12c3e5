pub mod catalog;
pub mod commands;
pub mod comments;
pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod gateway;
pub mod handler;
pub mod intent;

pub use catalog::{StatusKey, StatusQuery};
pub use comments::{CommentEntry, extract_comments};
pub use config::{AuthType, Config};
pub use error::{Result, ZdError};
pub use gateway::{
    AuditEvent, AuditRecord, Person, SearchResult, TicketDetail, TicketGateway, TicketSummary,
    ZendeskGateway,
};
pub use handler::CommandHandler;
pub use intent::{Intent, match_command};
