//! Report forwarding to a webhook endpoint

use reqwest::Client;
use tracing::info;

use crate::error::ReportError;
use crate::report::Report;

pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// POST the full report once. No retries.
    pub async fn post_report(&self, report: &Report) -> Result<(), ReportError> {
        info!("Posting report to webhook");

        let response = self.client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(report)
            .send()
            .await
            .map_err(|e| ReportError::Webhook(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ReportError::Webhook(format!(
                "HTTP request failed with status: {}",
                response.status()
            )));
        }

        info!("Posted report to webhook");
        Ok(())
    }
}
