use crate::document::Node;
use crate::error::{ConfigError, FetchError};
use std::env;
use tracing::debug;

/// Supplies raw issue documents by key.
pub trait DocumentSource {
    fn fetch_by_key(&self, key: &str) -> Result<Node, FetchError>;
}

pub struct JiraClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl JiraClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, FetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| FetchError::Other("token is not a valid header value".to_string()))?,
        );

        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .default_headers(headers)
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from `JIRA_BASE_URL` and `JIRA_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let base_url = env::var("JIRA_BASE_URL").map_err(|_| ConfigError::Missing("JIRA_BASE_URL"))?;
        let token = env::var("JIRA_TOKEN").map_err(|_| ConfigError::Missing("JIRA_TOKEN"))?;
        Ok(Self::new(&base_url, &token)?)
    }

    fn get(&self, url: reqwest::Url) -> Result<Node, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(Node::from_slice(&response.bytes()?)?)
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Url, FetchError> {
        reqwest::Url::parse_with_params(&format!("{}{}", self.base_url, path), params)
            .map_err(|e| FetchError::Other(e.to_string()))
    }

    pub fn get_issue(&self, key: &str) -> Result<Node, FetchError> {
        self.get(self.url(&format!("/rest/api/2/issue/{}", key), &[])?)
    }

    /// One page of a JQL search with every field expanded.
    pub fn search(&self, jql: &str, start_at: usize) -> Result<Node, FetchError> {
        let start_at = start_at.to_string();
        self.get(self.url(
            "/rest/api/2/search",
            &[("jql", jql), ("startAt", start_at.as_str()), ("fields", "*all")],
        )?)
    }
}

impl DocumentSource for JiraClient {
    fn fetch_by_key(&self, key: &str) -> Result<Node, FetchError> {
        self.get_issue(key)
    }
}
