use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::{error, info};

/// SMS over the Twilio Messages API.
pub struct TwilioSmsProvider {
    client: Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioSmsProvider {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            account_sid,
            auth_token,
            from_number,
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        )
    }

    pub async fn send(&self, to: &str, body: &str) -> Result<()> {
        let form = [
            ("To", to),
            ("From", self.from_number.as_str()),
            ("Body", body),
        ];

        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let response_body = resp.text().await.unwrap_or_default();
            error!(
                status = %status,
                response_body = %response_body,
                "notifications: twilio rejected sms"
            );
            anyhow::bail!("Twilio SMS request failed with status {}", status);
        }

        info!("notifications: sms sent");
        Ok(())
    }
}
