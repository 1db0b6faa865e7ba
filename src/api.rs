use std::time::Duration;

use anyhow::Context;
use log::info;
use reqwest::header;
use url::Url;

use crate::config::Config;

/// Downloads the page that carries the schedule table.
pub struct PageClient {
    client: reqwest::Client,
    url: Url,
}

impl PageClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub async fn fetch_html(&self) -> anyhow::Result<String> {
        info!("Fetching {}", self.url);
        let html = self
            .client
            .get(self.url.clone())
            .header(header::ACCEPT_LANGUAGE, "uk-UA,uk;q=0.9")
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("While fetching {}", self.url))?
            .text()
            .await?;
        info!("Downloaded {} bytes", html.len());
        Ok(html)
    }
}
