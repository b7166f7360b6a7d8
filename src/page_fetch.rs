use anyhow::{Context, Result, anyhow};
use reqwest::header::{ACCEPT, USER_AGENT};

use crate::bridge::{BridgeResponse, parse_bridge_body};
use crate::config::Config;
use crate::form::CSRF_FIELD;
use crate::http_client::http_client;

pub const BRIDGE_HEADER: (&str, &str) = ("X-Requested-With", "DjangoBridge");
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Where pages come from: the live backend or the seeded demo.
pub trait PageSource {
    fn get(&mut self, path: &str) -> Result<FetchedPage>;
    fn post(&mut self, action: &str, fields: &[(String, String)]) -> Result<FetchedPage>;
}

pub struct HttpSource {
    config: Config,
}

impl HttpSource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl PageSource for HttpSource {
    fn get(&mut self, path: &str) -> Result<FetchedPage> {
        let client = http_client(self.config.timeout_secs)?;
        let url = self.config.url_for(path);
        let resp = client
            .get(&url)
            .header(BRIDGE_HEADER.0, BRIDGE_HEADER.1)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, "matchday-terminal")
            .send()
            .with_context(|| format!("request failed: GET {url}"))?;
        let status = resp.status().as_u16();
        let body = resp.text().context("failed reading body")?;
        Ok(FetchedPage { status, body })
    }

    fn post(&mut self, action: &str, fields: &[(String, String)]) -> Result<FetchedPage> {
        let client = http_client(self.config.timeout_secs)?;
        let url = self.config.url_for(action);
        let mut req = client
            .post(&url)
            .header(BRIDGE_HEADER.0, BRIDGE_HEADER.1)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, "matchday-terminal")
            .form(fields);
        if let Some((_, token)) = fields.iter().find(|(name, _)| name == CSRF_FIELD) {
            req = req.header(CSRF_HEADER, token.as_str());
        }
        let resp = req
            .send()
            .with_context(|| format!("request failed: POST {url}"))?;
        let status = resp.status().as_u16();
        let body = resp.text().context("failed reading body")?;
        Ok(FetchedPage { status, body })
    }
}

#[derive(Debug, Clone)]
pub enum Fetched {
    Envelope(BridgeResponse),
    NotFound,
    ServerError(Option<String>),
}

/// Read the envelope from a body; error statuses without one map onto the
/// matching page outcome.
pub fn interpret(page: &FetchedPage) -> Result<Fetched> {
    match parse_bridge_body(&page.body) {
        Ok(envelope) => Ok(Fetched::Envelope(envelope)),
        Err(err) => match page.status {
            404 => Ok(Fetched::NotFound),
            500..=599 => Ok(Fetched::ServerError(Some(format!("http {}", page.status)))),
            status if !(200..300).contains(&status) => Err(anyhow!("http {status}")),
            _ => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(status: u16, body: &str) -> FetchedPage {
        FetchedPage {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn envelope_wins_over_status() {
        let fetched = interpret(&page(404, r#"{"status":"NotFound"}"#)).unwrap();
        assert!(matches!(fetched, Fetched::Envelope(BridgeResponse::NotFound)));
    }

    #[test]
    fn bare_error_pages_map_to_outcomes() {
        assert!(matches!(
            interpret(&page(404, "<h1>Not Found</h1>")).unwrap(),
            Fetched::NotFound
        ));
        assert!(matches!(
            interpret(&page(502, "bad gateway")).unwrap(),
            Fetched::ServerError(Some(_))
        ));
        assert!(interpret(&page(403, "forbidden")).is_err());
        assert!(interpret(&page(200, "not json")).is_err());
    }
}
