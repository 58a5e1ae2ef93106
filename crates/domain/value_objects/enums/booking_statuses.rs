use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::payment_statuses::PaymentStatus;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a booking sits in the payment lifecycle, derived from the stored
/// `(status, payment_status)` pair. Confirmation and failure handling match on
/// this exhaustively so a new state cannot silently skip the slot guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingLifecycle {
    /// Created at checkout, waiting for the payment gateway.
    Pending,
    /// Payment confirmed; the booking holds (or is about to hold) a time slot.
    Paid,
    /// Payment was declined; any slot has been released.
    Failed,
    /// Cancelled by staff without a payment failure.
    Cancelled,
}

impl BookingLifecycle {
    pub fn from_statuses(status: BookingStatus, payment_status: PaymentStatus) -> Self {
        match (status, payment_status) {
            (BookingStatus::Cancelled, PaymentStatus::Failed) => BookingLifecycle::Failed,
            (BookingStatus::Cancelled, _) => BookingLifecycle::Cancelled,
            (_, PaymentStatus::Paid) => BookingLifecycle::Paid,
            (_, PaymentStatus::Failed) => BookingLifecycle::Failed,
            (_, PaymentStatus::Pending) => BookingLifecycle::Pending,
        }
    }

    /// Parses the raw column values; unknown strings are treated as the most
    /// restrictive state so that nothing downstream assumes a payment happened.
    pub fn from_columns(status: &str, payment_status: &str) -> Self {
        match (
            BookingStatus::from_str(status),
            PaymentStatus::from_str(payment_status),
        ) {
            (Some(status), Some(payment_status)) => Self::from_statuses(status, payment_status),
            _ => BookingLifecycle::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_is_derived_from_stored_pair() {
        assert_eq!(
            BookingLifecycle::from_columns("pending", "pending"),
            BookingLifecycle::Pending
        );
        assert_eq!(
            BookingLifecycle::from_columns("confirmed", "paid"),
            BookingLifecycle::Paid
        );
        assert_eq!(
            BookingLifecycle::from_columns("completed", "paid"),
            BookingLifecycle::Paid
        );
        assert_eq!(
            BookingLifecycle::from_columns("cancelled", "failed"),
            BookingLifecycle::Failed
        );
        assert_eq!(
            BookingLifecycle::from_columns("cancelled", "paid"),
            BookingLifecycle::Cancelled
        );
    }

    #[test]
    fn unknown_columns_do_not_look_paid() {
        assert_eq!(
            BookingLifecycle::from_columns("confirmed", "refunded"),
            BookingLifecycle::Cancelled
        );
    }
}
