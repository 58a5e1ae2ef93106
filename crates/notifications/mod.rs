mod email;
mod messages;
mod sms;

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

pub use email::{EmailMessage, ResendEmailProvider};
pub use messages::{BookingNotice, InvoiceNotice, format_amount};
pub use sms::TwilioSmsProvider;

/// Whether a message actually left for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No channel configured or no recipient on file.
    Skipped,
}

/// Outbound customer and staff messages. Callers treat every failure as
/// best-effort and never roll back state because of one.
#[async_trait]
#[automock]
pub trait NotificationGateway {
    async fn send_booking_confirmation(&self, notice: &BookingNotice) -> Result<()>;
    async fn send_wedding_form_request(&self, notice: &BookingNotice) -> Result<()>;
    async fn send_admin_booking_alert(&self, notice: &BookingNotice) -> Result<()>;
    /// Reminders are tracked per invoice, so the caller needs to know when
    /// nothing was sent.
    async fn send_invoice_reminder(&self, notice: &InvoiceNotice) -> Result<Delivery>;
}

/// Fans messages out to whichever channels are configured. A missing channel or
/// recipient turns the message into a logged no-op.
pub struct Notifier {
    email: Option<ResendEmailProvider>,
    sms: Option<TwilioSmsProvider>,
    admin_phone: Option<String>,
    frontend_base_url: String,
}

impl Notifier {
    pub fn new(
        email: Option<ResendEmailProvider>,
        sms: Option<TwilioSmsProvider>,
        admin_phone: Option<String>,
        frontend_base_url: String,
    ) -> Self {
        info!(
            email_enabled = email.is_some(),
            sms_enabled = sms.is_some() && admin_phone.is_some(),
            "notifications: channels configured"
        );

        Self {
            email,
            sms,
            admin_phone,
            frontend_base_url,
        }
    }

    async fn send_email(&self, to: Option<&str>, message: EmailMessage) -> Result<Delivery> {
        let (Some(provider), Some(to)) = (self.email.as_ref(), to) else {
            debug!(subject = %message.subject, "notifications: email skipped, channel or recipient missing");
            return Ok(Delivery::Skipped);
        };

        provider.send(to, &message).await?;
        Ok(Delivery::Sent)
    }
}

#[async_trait]
impl NotificationGateway for Notifier {
    async fn send_booking_confirmation(&self, notice: &BookingNotice) -> Result<()> {
        self.send_email(
            notice.customer_email.as_deref(),
            notice.confirmation_email(&self.frontend_base_url),
        )
        .await
        .map(|_| ())
    }

    async fn send_wedding_form_request(&self, notice: &BookingNotice) -> Result<()> {
        self.send_email(
            notice.customer_email.as_deref(),
            notice.wedding_form_email(&self.frontend_base_url),
        )
        .await
        .map(|_| ())
    }

    async fn send_admin_booking_alert(&self, notice: &BookingNotice) -> Result<()> {
        let (Some(provider), Some(to)) = (self.sms.as_ref(), self.admin_phone.as_deref()) else {
            debug!(booking_id = %notice.booking_id, "notifications: admin sms skipped, channel not configured");
            return Ok(());
        };

        provider.send(to, &notice.admin_sms()).await
    }

    async fn send_invoice_reminder(&self, notice: &InvoiceNotice) -> Result<Delivery> {
        self.send_email(
            notice.customer_email.as_deref(),
            notice.reminder_email(&self.frontend_base_url),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn reminder(customer_email: Option<&str>) -> InvoiceNotice {
        InvoiceNotice {
            invoice_number: "INV-2025-0007".to_string(),
            booking_id: Uuid::new_v4(),
            customer_email: customer_email.map(str::to_string),
            amount_due: 60_000,
            due_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        }
    }

    #[tokio::test]
    async fn reminder_without_email_channel_is_skipped() {
        let notifier = Notifier::new(None, None, None, "http://localhost:3000".to_string());

        let delivery = notifier
            .send_invoice_reminder(&reminder(Some("client@example.com")))
            .await
            .unwrap();

        assert_eq!(delivery, Delivery::Skipped);
    }

    #[tokio::test]
    async fn reminder_without_recipient_is_skipped() {
        let notifier = Notifier::new(
            Some(ResendEmailProvider::new(
                "re_test".to_string(),
                "billing@example.com".to_string(),
            )
            .unwrap()),
            None,
            None,
            "http://localhost:3000".to_string(),
        );

        let delivery = notifier.send_invoice_reminder(&reminder(None)).await.unwrap();

        assert_eq!(delivery, Delivery::Skipped);
    }
}
