//! Zendesk REST API (v2) gateway.
//!
//! # Security Note - Logging
//!
//! The credential is kept in a `SecretString` and only exposed while the
//! basic-auth header is built. Request URLs are logged at `debug` level; they
//! never contain credentials.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Result, ZdError};

use super::{
    AuditEvent, AuditRecord, Person, SearchResult, TicketDetail, TicketGateway, TicketSummary,
};

/// Zendesk refuses `per_page` values above this
const MAX_PER_PAGE: usize = 100;

/// Upper bound on audit pages followed for one ticket
const MAX_AUDIT_PAGES: usize = 20;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Gateway backed by a tenant's Zendesk API
pub struct ZendeskGateway {
    client: Client,
    base_url: String,
    api_url: Url,
    user: String,
    secret: SecretString,
    timeout_secs: u64,
}

impl ZendeskGateway {
    /// Create a gateway from validated configuration.
    ///
    /// The HTTP client applies the configured total timeout to each request;
    /// a timeout of 0 disables it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.base_url_string()?;
        let api_url = Url::parse(&format!("{}/api/v2/", base_url))?;
        let (user, secret) = config.credentials();

        let mut builder = Client::builder();
        if config.timeout > 0 {
            builder = builder
                .timeout(Duration::from_secs(config.timeout))
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(config.timeout)));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            api_url,
            user,
            secret,
            timeout_secs: config.timeout,
        })
    }

    /// Web URL agents open to view a ticket
    pub fn ticket_url(&self, id: u64) -> String {
        format!("{}/tickets/{}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        ticket_id: Option<u64>,
    ) -> Result<T> {
        tracing::debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.user, Some(self.secret.expose_secret()))
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = check_status(response, ticket_id)?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_url.join(path)?)
    }

    /// Parse a pagination link, refusing any host other than the API's own.
    /// Credentials go with every request, so they must not leave the tenant.
    fn follow_link(&self, link: &str) -> Result<Url> {
        let url = Url::parse(link)?;
        if url.origin() != self.api_url.origin() {
            return Err(ZdError::Api(format!(
                "refusing to follow pagination link to {}",
                url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }

    fn transport_error(&self, error: reqwest::Error) -> ZdError {
        if error.is_timeout() {
            ZdError::Timeout(self.timeout_secs)
        } else {
            ZdError::Http(error)
        }
    }

    fn convert_hit(&self, hit: WireTicket) -> TicketSummary {
        TicketSummary {
            id: hit.id,
            status: hit.status.unwrap_or_default(),
            subject: hit.subject.unwrap_or_default(),
            url: self.ticket_url(hit.id),
        }
    }
}

/// Map a non-success HTTP status onto the crate error taxonomy
fn check_status(response: Response, ticket_id: Option<u64>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => match ticket_id {
            Some(id) => Err(ZdError::TicketNotFound(id)),
            None => Err(ZdError::Api(format!("HTTP {}", status))),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ZdError::Auth(format!(
            "Zendesk rejected the configured credentials (HTTP {})",
            status.as_u16()
        ))),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            Err(ZdError::RateLimited(retry_after))
        }
        _ => Err(ZdError::Api(format!("HTTP {}", status))),
    }
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<WireTicket>,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct TicketResponse {
    ticket: WireTicket,
    #[serde(default)]
    users: Vec<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireTicket {
    id: u64,
    status: Option<String>,
    subject: Option<String>,
    description: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    requester_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: u64,
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuditsResponse {
    #[serde(default)]
    audits: Vec<WireAudit>,
    #[serde(default)]
    users: Vec<WireUser>,
    next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireAudit {
    created_at: String,
    #[serde(default)]
    events: Vec<WireEvent>,
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(rename = "type")]
    kind: String,
    author_id: Option<u64>,
    body: Option<String>,
}

fn people_by_id(users: Vec<WireUser>) -> HashMap<u64, Person> {
    users
        .into_iter()
        .map(|u| {
            (
                u.id,
                Person {
                    name: u.name,
                    email: u.email,
                },
            )
        })
        .collect()
}

fn convert_audit(audit: WireAudit, people: &HashMap<u64, Person>) -> AuditRecord {
    AuditRecord {
        created_at: audit.created_at,
        events: audit
            .events
            .into_iter()
            .map(|event| AuditEvent {
                kind: event.kind,
                author: event.author_id.and_then(|id| people.get(&id).cloned()),
                body: event.body,
            })
            .collect(),
    }
}

impl TicketGateway for ZendeskGateway {
    async fn count_matching(&self, fragment: &str) -> Result<u64> {
        let url = self.endpoint("search/count.json")?;
        let response: CountResponse = self
            .get_json(url, &[("query", fragment.to_string())], None)
            .await?;
        Ok(response.count)
    }

    async fn search(&self, fragment: &str, limit: usize) -> Result<SearchResult> {
        let url = self.endpoint("search.json")?;
        let per_page = limit.clamp(1, MAX_PER_PAGE);
        let response: SearchResponse = self
            .get_json(
                url,
                &[
                    ("query", fragment.to_string()),
                    ("per_page", per_page.to_string()),
                ],
                None,
            )
            .await?;

        let tickets = response
            .results
            .into_iter()
            .take(limit)
            .map(|hit| self.convert_hit(hit))
            .collect();

        Ok(SearchResult {
            tickets,
            total: response.count,
        })
    }

    async fn get_ticket(&self, id: u64) -> Result<TicketDetail> {
        let url = self.endpoint(&format!("tickets/{}.json", id))?;
        let response: TicketResponse = self
            .get_json(url, &[("include", "users".to_string())], Some(id))
            .await?;

        let people = people_by_id(response.users);
        let ticket = response.ticket;
        let requester = ticket
            .requester_id
            .and_then(|requester_id| people.get(&requester_id).cloned());

        Ok(TicketDetail {
            description: ticket.description.clone().unwrap_or_default(),
            created_at: ticket.created_at.clone().unwrap_or_default(),
            updated_at: ticket.updated_at.clone().unwrap_or_default(),
            requester,
            summary: self.convert_hit(ticket),
        })
    }

    /// Pages are fetched newest first so a truncated history keeps the latest
    /// audits; the result is returned oldest first.
    async fn get_audit_history(&self, id: u64) -> Result<Vec<AuditRecord>> {
        let mut url = self.endpoint(&format!("tickets/{}/audits.json", id))?;
        let mut query = vec![
            ("include", "users".to_string()),
            ("sort_order", "desc".to_string()),
        ];
        let mut records = Vec::new();
        let mut complete = false;

        for _ in 0..MAX_AUDIT_PAGES {
            let page: AuditsResponse = self.get_json(url, &query, Some(id)).await?;
            let people = people_by_id(page.users);
            records.extend(
                page.audits
                    .into_iter()
                    .map(|audit| convert_audit(audit, &people)),
            );

            match page.next_page {
                // next_page already carries every query parameter
                Some(next) => {
                    url = self.follow_link(&next)?;
                    query.clear();
                }
                None => {
                    complete = true;
                    break;
                }
            }
        }

        if !complete {
            tracing::warn!(ticket = id, "audit history truncated after {MAX_AUDIT_PAGES} pages");
        }
        records.reverse();
        Ok(records)
    }
}
