use std::collections::HashMap;

use anyhow::Result;
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use sha2::Sha256;
use tracing::error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";
pub const BOOKING_ID_METADATA_KEY: &str = "booking_id";

/// Minimal Stripe client built on reqwest.
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    webhook_secret: String,
    currency: String,
}

#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    pub created: Option<i64>,
    pub livemode: Option<bool>,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub status: String,
    pub amount: Option<i64>,
    pub client_secret: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripePaymentIntent {
    pub fn booking_id(&self) -> Option<Uuid> {
        booking_id_from(&self.metadata)
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

#[derive(Debug, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: Option<String>,
    pub payment_intent: Option<String>,
    pub payment_status: Option<String>,
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeCheckoutSession {
    pub fn booking_id(&self) -> Option<Uuid> {
        booking_id_from(&self.metadata)
    }
}

fn booking_id_from(metadata: &HashMap<String, String>) -> Option<Uuid> {
    metadata
        .get(BOOKING_ID_METADATA_KEY)
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorDetails,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetails {
    #[serde(rename = "type")]
    type_: Option<String>,
    code: Option<String>,
    message: Option<String>,
    param: Option<String>,
    decline_code: Option<String>,
}

impl StripeClient {
    pub fn new(secret_key: String, webhook_secret: String, currency: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            webhook_secret,
            currency,
        }
    }

    async fn ensure_success(
        resp: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("request-id")
            .or_else(|| resp.headers().get("stripe-request-id"))
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let details = serde_json::from_str::<StripeErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error);

        error!(
            status = %status,
            stripe_request_id = ?request_id,
            stripe_error_type = ?details.as_ref().and_then(|d| d.type_.as_deref()),
            stripe_error_code = ?details.as_ref().and_then(|d| d.code.as_deref()),
            stripe_error_param = ?details.as_ref().and_then(|d| d.param.as_deref()),
            stripe_error_message = ?details.as_ref().and_then(|d| d.message.as_deref()),
            stripe_decline_code = ?details.as_ref().and_then(|d| d.decline_code.as_deref()),
            context = %context,
            "stripe api request failed"
        );

        anyhow::bail!(
            "Stripe API request failed: {} (status {}, request_id={:?})",
            context,
            status,
            request_id
        );
    }

    /// Creates a PaymentIntent for `amount` minor units tagged with the booking id.
    /// https://stripe.com/docs/api/payment_intents/create
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        booking_id: Uuid,
        receipt_email: Option<&str>,
    ) -> Result<StripePaymentIntent> {
        let mut body: Vec<(String, String)> = vec![
            ("amount".to_string(), amount.to_string()),
            ("currency".to_string(), self.currency.clone()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
            (
                format!("metadata[{}]", BOOKING_ID_METADATA_KEY),
                booking_id.to_string(),
            ),
        ];

        if let Some(email) = receipt_email {
            body.push(("receipt_email".to_string(), email.to_string()));
        }

        let resp = self
            .http
            .post(format!("{}/payment_intents", STRIPE_API_BASE))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("Idempotency-Key", format!("booking-{}", booking_id))
            .form(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create payment intent").await?;

        let intent: StripePaymentIntent = resp.json().await?;
        Ok(intent)
    }

    /// https://stripe.com/docs/api/payment_intents/retrieve
    pub async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<StripePaymentIntent> {
        let resp = self
            .http
            .get(format!(
                "{}/payment_intents/{}",
                STRIPE_API_BASE, payment_intent_id
            ))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "retrieve payment intent").await?;

        let intent: StripePaymentIntent = resp.json().await?;
        Ok(intent)
    }

    /// Verifies the webhook signature. https://stripe.com/docs/webhooks/signatures
    pub fn verify_webhook_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent> {
        verify_signature(&self.webhook_secret, payload, signature_header)
    }

    pub fn extract_payment_intent(event: &StripeEvent) -> Option<StripePaymentIntent> {
        serde_json::from_value(event.data.object.clone()).ok()
    }

    pub fn extract_checkout_session(event: &StripeEvent) -> Option<StripeCheckoutSession> {
        serde_json::from_value(event.data.object.clone()).ok()
    }
}

fn verify_signature(
    webhook_secret: &str,
    payload: &[u8],
    signature_header: &str,
) -> Result<StripeEvent> {
    let mut timestamp: Option<&str> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in signature_header.split(',') {
        let part = part.trim();
        if let Some(rest) = part.strip_prefix("t=") {
            timestamp = Some(rest);
        } else if let Some(rest) = part.strip_prefix("v1=") {
            signatures.push(rest);
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| anyhow::anyhow!("missing timestamp in stripe-signature"))?;
    if signatures.is_empty() {
        anyhow::bail!("missing v1 in stripe-signature");
    }

    let mut mac = HmacSha256::new_from_slice(webhook_secret.as_bytes())?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    // Stripe sends one v1 entry per active secret during rotation.
    let matched = signatures
        .iter()
        .filter_map(|signature| hex::decode(signature).ok())
        .any(|provided| expected[..] == provided[..]);

    if !matched {
        anyhow::bail!("invalid webhook signature");
    }

    let event: StripeEvent = serde_json::from_slice(payload)?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    fn sign(payload: &str, timestamp: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("{}.{}", timestamp, payload).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn payload(booking_id: Uuid) -> String {
        serde_json::json!({
            "id": "evt_1",
            "type": "payment_intent.succeeded",
            "data": {
                "object": {
                    "id": "pi_123",
                    "status": "succeeded",
                    "amount": 60000,
                    "metadata": { "booking_id": booking_id.to_string() }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn accepts_valid_signature_and_extracts_booking_id() {
        let booking_id = Uuid::new_v4();
        let body = payload(booking_id);
        let header = format!("t=1700000000,v1={}", sign(&body, "1700000000"));

        let client = StripeClient::new("sk".into(), SECRET.into(), "usd".into());
        let event = client
            .verify_webhook_signature(body.as_bytes(), &header)
            .unwrap();

        assert_eq!(event.type_, "payment_intent.succeeded");
        let intent = StripeClient::extract_payment_intent(&event).unwrap();
        assert_eq!(intent.id, "pi_123");
        assert!(intent.is_succeeded());
        assert_eq!(intent.booking_id(), Some(booking_id));
    }

    #[test]
    fn accepts_any_matching_v1_entry() {
        let body = payload(Uuid::new_v4());
        let header = format!(
            "t=1700000000,v1=deadbeef,v1={}",
            sign(&body, "1700000000")
        );

        assert!(verify_signature(SECRET, body.as_bytes(), &header).is_ok());
    }

    #[test]
    fn rejects_tampered_payload() {
        let body = payload(Uuid::new_v4());
        let header = format!("t=1700000000,v1={}", sign(&body, "1700000000"));
        let tampered = body.replace("60000", "1");

        assert!(verify_signature(SECRET, tampered.as_bytes(), &header).is_err());
    }

    #[test]
    fn rejects_header_without_timestamp() {
        let body = payload(Uuid::new_v4());
        let header = format!("v1={}", sign(&body, "1700000000"));

        assert!(verify_signature(SECRET, body.as_bytes(), &header).is_err());
    }

    #[test]
    fn checkout_session_without_booking_metadata_has_no_booking_id() {
        let session: StripeCheckoutSession = serde_json::from_value(serde_json::json!({
            "id": "cs_1",
            "payment_intent": "pi_9",
            "payment_status": "paid"
        }))
        .unwrap();

        assert_eq!(session.booking_id(), None);
        assert_eq!(session.payment_intent.as_deref(), Some("pi_9"));
    }
}
