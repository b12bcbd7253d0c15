use crate::config::Settings;
use crate::domain::request::ChartRequest;
use crate::domain::response::ChartResponse;
use crate::ingest::error::ChartServiceError;
use anyhow::{Context, Result};
use std::time::Duration;

const CHART_PATH: &str = "/api/chart";
const MAX_RETRIES: u32 = 8;
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Remote chart computation.
#[async_trait::async_trait]
pub trait ChartService: Send + Sync {
    fn service_name(&self) -> &'static str;

    /// Fetches the chart for `req`.
    ///
    /// A non-2xx answer is reported as [`ChartServiceError`]; anything else that fails (connect,
    /// timeout, undecodable body) is a plain error.
    async fn fetch_chart(&self, req: &ChartRequest) -> Result<ChartResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpChartService {
    http: reqwest::Client,
    base_url: String,
    retries: u32,
}

impl HttpChartService {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_chart_api_base_url()?;
        Self::new(
            base_url,
            Duration::from_secs(settings.chart_api_timeout_secs),
            settings.chart_api_retries,
        )
    }

    pub fn new(base_url: &str, timeout: Duration, retries: u32) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build chart service http client")?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            retries: retries.clamp(1, MAX_RETRIES),
        })
    }

    /// Sleep before attempt `attempt + 1`: 1s, 2s, 4s, ... capped at [`MAX_BACKOFF`].
    fn backoff(attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        Duration::from_secs(1u64 << exp).min(MAX_BACKOFF)
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHART_PATH)
    }

    async fn fetch_once(&self, req: &ChartRequest) -> Result<ChartResponse> {
        let res = self
            .http
            .get(self.url())
            .query(&req.query_pairs())
            .send()
            .await
            .context("chart service request failed")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.ok();
            return Err(ChartServiceError { status, body }.into());
        }

        let text = res
            .text()
            .await
            .context("failed to read chart service response")?;
        serde_json::from_str::<ChartResponse>(&text)
            .context("failed to parse chart service response into ChartResponse")
    }
}

#[async_trait::async_trait]
impl ChartService for HttpChartService {
    fn service_name(&self) -> &'static str {
        "http_chart_api"
    }

    async fn fetch_chart(&self, req: &ChartRequest) -> Result<ChartResponse> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.fetch_once(req).await {
                Ok(resp) => return Ok(resp),
                // A status answer is final; only transport failures are retried.
                Err(err) if err.is::<ChartServiceError>() => return Err(err),
                Err(err) => {
                    if attempt >= self.retries {
                        return Err(err);
                    }
                    let backoff = Self::backoff(attempt);
                    tracing::warn!(attempt, ?backoff, error = %err, "chart fetch failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}
