//! Blocking HTTP access to the quotation widget.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header;
use tracing::info;

use crate::config;
use crate::error::Result;

/// Single-shot fetcher for the widget page. No retries: a failed or timed
/// out request fails the run.
pub struct WidgetClient {
    url: String,
    client: Client,
}

impl WidgetClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the widget and return its body. Non-success statuses are errors.
    pub fn fetch_html(&self) -> Result<String> {
        info!(url = %self.url, "fetching quotation widget");
        let resp = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "text/html")
            .send()?
            .error_for_status()?;
        Ok(resp.text()?)
    }
}
