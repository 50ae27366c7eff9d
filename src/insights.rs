//! Insight text for a dataset, produced by an external service.
//!
//! The chart pipeline never depends on this module: insight failures are reported
//! to the caller and charts are exported regardless.

use log::{debug, warn};
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::error::InsightError;
use crate::models::Dataset;

/// Shown when the service answers but returns no text.
pub const NO_INSIGHTS: &str = "No insights generated.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightReport {
    #[serde(default)]
    pub insights: String,
    #[serde(default)]
    pub summary: String,
}

impl InsightReport {
    /// Replace blank insight text with [`NO_INSIGHTS`].
    pub fn normalized(mut self) -> Self {
        if self.insights.trim().is_empty() {
            self.insights = NO_INSIGHTS.to_string();
        }
        self
    }
}

pub trait InsightProvider {
    fn generate(&self, dataset: &Dataset) -> Result<InsightReport, InsightError>;
}

/// Posts `{ "data": rows }` to `<base_url>/ai/insights`.
#[derive(Debug, Clone)]
pub struct HttpInsightClient {
    pub base_url: String,
    http: HttpClient,
}

impl HttpInsightClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, InsightError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(60)) // generation is slow
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("sheetviz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/ai/insights", self.base_url)
    }
}

impl InsightProvider for HttpInsightClient {
    fn generate(&self, dataset: &Dataset) -> Result<InsightReport, InsightError> {
        let url = self.endpoint();
        let body = json!({ "data": dataset });

        // Small retry for transient failures (5xx / network errors)
        let mut last_err: Option<reqwest::Error> = None;
        for backoff_ms in [200u64, 600, 1400] {
            match self.http.post(&url).json(&body).send() {
                Ok(r) if r.status().is_success() => {
                    let report: InsightReport = r.json()?;
                    debug!("received insights from {url}");
                    return Ok(report.normalized());
                }
                Ok(r) if r.status().is_server_error() => {
                    warn!("insight service returned HTTP {}; retrying", r.status());
                }
                Ok(r) => return Err(InsightError::Status(r.status().as_u16())),
                Err(e) => last_err = Some(e),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        Err(match last_err {
            Some(e) => InsightError::Transport(e),
            None => InsightError::Unavailable,
        })
    }
}
