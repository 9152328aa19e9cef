use crate::prelude::*;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://rickandmortyapi.com/api";

/// Source of raw character payloads
///
/// The catalog service only needs these two calls, which keeps it testable
/// against an in-memory implementation.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetch one page of the character listing with the given query parameters
    async fn fetch_page(&self, page: u64, params: &[(String, String)]) -> Result<Value, Error>;

    /// Fetch a single character record
    async fn fetch_one(&self, id: i64) -> Result<Value, Error>;
}

/// `reqwest`-backed transport against the character API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        let transport = Self::new(&global.api_base, Duration::from_secs(global.timeout))?;
        debug!("Using character API at {}", transport.base());
        Ok(transport)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error> {
        debug!("GET {url} {query:?}");

        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

impl Transport for HttpTransport {
    async fn fetch_page(&self, page: u64, params: &[(String, String)]) -> Result<Value, Error> {
        let url = format!("{}/character", self.base);
        let mut query = vec![("page".to_string(), page.to_string())];
        query.extend_from_slice(params);

        self.get_json(&url, &query).await
    }

    async fn fetch_one(&self, id: i64) -> Result<Value, Error> {
        let url = format!("{}/character/{id}", self.base);
        self.get_json(&url, &[]).await
    }
}
