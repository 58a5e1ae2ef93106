use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::json;
use tracing::{error, info};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
}

/// Transactional email over the Resend HTTP API.
pub struct ResendEmailProvider {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendEmailProvider {
    pub fn new(api_key: String, from: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            api_key,
            from,
        })
    }

    pub async fn send(&self, to: &str, message: &EmailMessage) -> Result<()> {
        let resp = self
            .client
            .post(RESEND_API_URL)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&json!({
                "from": self.from,
                "to": [to],
                "subject": message.subject,
                "html": message.html,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(
                status = %status,
                response_body = %body,
                subject = %message.subject,
                "notifications: resend rejected email"
            );
            anyhow::bail!("Resend email request failed with status {}", status);
        }

        info!(subject = %message.subject, "notifications: email sent");
        Ok(())
    }
}
