use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZdError {
    #[error("ticket {0} not found")]
    TicketNotFound(u64),

    #[error("unrecognized command '{0}'. Run 'zdbot commands' for the list")]
    UnknownCommand(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ZdError {
    /// Whether this error means the requested ticket does not exist.
    ///
    /// Every other variant is reported to chat users as a generic backend failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ZdError::TicketNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ZdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ticket_not_found_is_not_found() {
        assert!(ZdError::TicketNotFound(42).is_not_found());
        assert!(!ZdError::Api("HTTP 500".to_string()).is_not_found());
        assert!(!ZdError::RateLimited(60).is_not_found());
        assert!(!ZdError::Auth("bad credentials".to_string()).is_not_found());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(ZdError::TicketNotFound(42).to_string(), "ticket 42 not found");
        assert_eq!(
            ZdError::Timeout(30).to_string(),
            "request timed out after 30 seconds"
        );
    }
}
