use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::invoices::InvoiceEntity;
use crate::domain::value_objects::enums::{
    invoice_statuses::InvoiceStatus, payment_statuses::PaymentStatus,
};

pub const INVOICE_PREFIX: &str = "INV";
pub const PAYMENT_TERMS_DAYS: i64 = 30;
pub const REMINDER_INTERVAL_DAYS: i64 = 7;

/// `INV-{year}-` prefix shared by every invoice issued in that calendar year.
pub fn invoice_number_prefix(year: i32) -> String {
    format!("{}-{}-", INVOICE_PREFIX, year)
}

fn sequence_of(prefix: &str, number: &str) -> Option<u32> {
    number.strip_prefix(prefix)?.parse().ok()
}

/// The number with the largest sequence under `prefix`. Sequences grow past
/// four digits, so they are compared as integers rather than as text.
pub fn highest_invoice_number<I, S>(prefix: &str, numbers: I) -> Option<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    numbers
        .into_iter()
        .filter_map(|number| sequence_of(prefix, number.as_ref()).map(|seq| (seq, number)))
        .max_by_key(|(seq, _)| *seq)
        .map(|(_, number)| number)
}

/// Next number in the year's sequence given the highest number issued so far.
/// The counter restarts at 0001 whenever the year prefix changes.
pub fn next_invoice_number(year: i32, highest_for_year: Option<&str>) -> String {
    let prefix = invoice_number_prefix(year);
    let current = highest_for_year
        .and_then(|number| sequence_of(&prefix, number))
        .unwrap_or(0);

    format!("{}{:04}", prefix, current + 1)
}

/// Paid/due split for an invoice. `amount_due` is always derived, never stored
/// independently of `total` and `amount_paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceAmounts {
    pub total: i32,
    pub amount_paid: i32,
}

impl InvoiceAmounts {
    pub fn for_payment(total: i32, payment_status: PaymentStatus) -> Self {
        let amount_paid = match payment_status {
            PaymentStatus::Paid => total,
            PaymentStatus::Pending | PaymentStatus::Failed => 0,
        };
        Self { total, amount_paid }
    }

    pub fn amount_due(&self) -> i32 {
        self.total - self.amount_paid
    }

    pub fn initial_status(&self) -> InvoiceStatus {
        if self.amount_due() == 0 {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Sent
        }
    }

    /// Re-derives the split when staff move an invoice to `status`, keeping
    /// `paid` equivalent to nothing left to collect.
    pub fn with_status(self, status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Paid => Self {
                amount_paid: self.total,
                ..self
            },
            _ if self.amount_due() == 0 => Self {
                amount_paid: 0,
                ..self
            },
            _ => self,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub invoice_number: String,
    pub total: i32,
    pub amount_paid: i32,
    pub amount_due: i32,
    pub status: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub reminder_count: i32,
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    pub next_reminder_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<InvoiceEntity> for InvoiceDto {
    fn from(value: InvoiceEntity) -> Self {
        Self {
            id: value.id,
            booking_id: value.booking_id,
            invoice_number: value.invoice_number,
            total: value.total,
            amount_paid: value.amount_paid,
            amount_due: value.amount_due,
            status: value.status,
            issue_date: value.issue_date,
            due_date: value.due_date,
            reminder_count: value.reminder_count,
            last_reminder_sent_at: value.last_reminder_sent_at,
            next_reminder_date: value.next_reminder_date,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub booking_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInvoicesQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoGenerateInvoicesResponse {
    pub generated: usize,
    pub invoice_numbers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_invoice_of_year_starts_at_one() {
        assert_eq!(next_invoice_number(2025, None), "INV-2025-0001");
    }

    #[test]
    fn sequence_increments_and_stays_padded() {
        assert_eq!(
            next_invoice_number(2025, Some("INV-2025-0041")),
            "INV-2025-0042"
        );
        assert_eq!(
            next_invoice_number(2025, Some("INV-2025-0999")),
            "INV-2025-1000"
        );
    }

    #[test]
    fn sequence_keeps_counting_past_four_digits() {
        assert_eq!(
            next_invoice_number(2025, Some("INV-2025-9999")),
            "INV-2025-10000"
        );
    }

    #[test]
    fn highest_number_compares_sequences_numerically() {
        let issued = ["INV-2025-0998", "INV-2025-9999", "INV-2025-10000", "INV-2025-0042"];
        assert_eq!(
            highest_invoice_number("INV-2025-", issued),
            Some("INV-2025-10000")
        );
    }

    #[test]
    fn highest_number_ignores_other_years_and_garbage() {
        let issued = vec![
            "INV-2026-0001".to_string(),
            "INV-2025-abc".to_string(),
            "INV-2025-0003".to_string(),
        ];
        assert_eq!(
            highest_invoice_number("INV-2025-", issued),
            Some("INV-2025-0003".to_string())
        );
        assert_eq!(highest_invoice_number::<_, &str>("INV-2025-", []), None);
    }

    #[test]
    fn sequence_restarts_when_year_changes() {
        assert_eq!(
            next_invoice_number(2026, Some("INV-2025-0137")),
            "INV-2026-0001"
        );
    }

    #[test]
    fn garbage_sequence_is_treated_as_empty() {
        assert_eq!(
            next_invoice_number(2025, Some("INV-2025-abc")),
            "INV-2025-0001"
        );
    }

    #[test]
    fn paid_booking_yields_paid_invoice() {
        let amounts = InvoiceAmounts::for_payment(60_000, PaymentStatus::Paid);
        assert_eq!(amounts.amount_due(), 0);
        assert_eq!(amounts.initial_status(), InvoiceStatus::Paid);
    }

    #[test]
    fn unpaid_booking_yields_sent_invoice() {
        let amounts = InvoiceAmounts::for_payment(60_000, PaymentStatus::Pending);
        assert_eq!(amounts.amount_paid, 0);
        assert_eq!(amounts.amount_due(), 60_000);
        assert_eq!(amounts.initial_status(), InvoiceStatus::Sent);
    }

    #[test]
    fn status_changes_keep_paid_equivalent_to_nothing_due() {
        let unpaid = InvoiceAmounts::for_payment(10_000, PaymentStatus::Pending);
        let paid = unpaid.with_status(InvoiceStatus::Paid);
        assert_eq!(paid.amount_due(), 0);

        let refunded = paid.with_status(InvoiceStatus::Refunded);
        assert_eq!(refunded.amount_paid, 0);
        assert_eq!(refunded.amount_due(), 10_000);

        let overdue = unpaid.with_status(InvoiceStatus::Overdue);
        assert_eq!(overdue, unpaid);
    }
}
