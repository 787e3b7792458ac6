use anyhow::{Context, Result};
use std::collections::HashMap;
use std::future::Future;

/// Capability to fetch a page body by URL.
///
/// Scrapers take this as a parameter so the locators can run against
/// in-memory pages.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// Fetches pages over HTTP with a shared client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url = %url, "Fetching page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch page")?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "HTTP {status} for {url}");

        let body = response.text().await.context("Failed to read response body")?;
        tracing::debug!(url = %url, bytes = body.len(), "Received HTML");
        Ok(body)
    }
}

/// Serves pages from memory, keyed by exact URL. Unknown URLs fail like a 404.
#[derive(Debug, Default, Clone)]
pub struct StaticPages {
    pages: HashMap<String, String>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }
}

impl PageFetcher for StaticPages {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .with_context(|| format!("HTTP 404 Not Found for {url}"))
    }
}
