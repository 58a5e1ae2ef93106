use chrono::NaiveDate;
use uuid::Uuid;

use super::email::EmailMessage;

/// What a message needs to know about a freshly confirmed booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingNotice {
    pub booking_id: Uuid,
    pub customer_email: Option<String>,
    pub service_provider: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub total_price: i32,
    pub is_wedding: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceNotice {
    pub invoice_number: String,
    pub booking_id: Uuid,
    pub customer_email: Option<String>,
    pub amount_due: i32,
    pub due_date: NaiveDate,
}

/// Minor units rendered as dollars, e.g. 60000 -> "$600.00".
pub fn format_amount(minor_units: i32) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

impl BookingNotice {
    fn schedule_line(&self) -> String {
        format!(
            "{} from {} to {}",
            self.event_date.format("%A, %B %-d, %Y"),
            self.start_time,
            self.end_time
        )
    }

    pub(crate) fn confirmation_email(&self, frontend_base_url: &str) -> EmailMessage {
        let subject = format!("Booking confirmed: {}", self.event_date.format("%B %-d, %Y"));
        let html = format!(
            "<h1>Your booking is confirmed</h1>\
             <p>Provider: {}</p>\
             <p>Event: {}</p>\
             <p>When: {}</p>\
             <p>Total paid: {}</p>\
             <p><a href=\"{}/bookings/{}\">View your booking</a></p>",
            self.service_provider,
            self.event_type,
            self.schedule_line(),
            format_amount(self.total_price),
            frontend_base_url.trim_end_matches('/'),
            self.booking_id
        );

        EmailMessage { subject, html }
    }

    pub(crate) fn wedding_form_email(&self, frontend_base_url: &str) -> EmailMessage {
        EmailMessage {
            subject: "Next step: your wedding planning form".to_string(),
            html: format!(
                "<p>Congratulations! Please fill in your wedding planning form so we can \
                 prepare for {}.</p><p><a href=\"{}/wedding-form/{}\">Open the form</a></p>",
                self.event_date.format("%B %-d, %Y"),
                frontend_base_url.trim_end_matches('/'),
                self.booking_id
            ),
        }
    }

    pub(crate) fn admin_sms(&self) -> String {
        format!(
            "New booking {}: {} ({}) on {}, {}",
            self.booking_id,
            self.service_provider,
            self.event_type,
            self.schedule_line(),
            format_amount(self.total_price)
        )
    }
}

impl InvoiceNotice {
    pub(crate) fn reminder_email(&self, frontend_base_url: &str) -> EmailMessage {
        EmailMessage {
            subject: format!("Payment reminder: invoice {}", self.invoice_number),
            html: format!(
                "<p>Invoice {} has {} outstanding, due {}.</p>\
                 <p><a href=\"{}/bookings/{}\">Pay now</a></p>",
                self.invoice_number,
                format_amount(self.amount_due),
                self.due_date.format("%B %-d, %Y"),
                frontend_base_url.trim_end_matches('/'),
                self.booking_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice() -> BookingNotice {
        BookingNotice {
            booking_id: Uuid::nil(),
            customer_email: Some("client@example.com".to_string()),
            service_provider: "dj_cease".to_string(),
            event_type: "birthday".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            start_time: "18:00".to_string(),
            end_time: "23:00".to_string(),
            total_price: 60_000,
            is_wedding: false,
        }
    }

    #[test]
    fn formats_minor_units() {
        assert_eq!(format_amount(60_000), "$600.00");
        assert_eq!(format_amount(12_505), "$125.05");
        assert_eq!(format_amount(0), "$0.00");
        assert_eq!(format_amount(-150), "-$1.50");
    }

    #[test]
    fn confirmation_email_links_to_booking() {
        let email = notice().confirmation_email("https://book.example.com/");
        assert_eq!(email.subject, "Booking confirmed: December 20, 2025");
        assert!(email.html.contains("$600.00"));
        assert!(email.html.contains(&format!(
            "https://book.example.com/bookings/{}",
            Uuid::nil()
        )));
    }

    #[test]
    fn admin_sms_mentions_provider_and_time() {
        let sms = notice().admin_sms();
        assert!(sms.contains("dj_cease"));
        assert!(sms.contains("18:00 to 23:00"));
    }
}
