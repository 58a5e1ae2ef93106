use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::invoices::{InsertInvoiceEntity, InvoiceEntity};

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    async fn find_by_booking_id(&self, booking_id: Uuid) -> Result<Option<InvoiceEntity>>;

    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>>;

    /// Invoice number with the numerically highest sequence under `prefix`,
    /// e.g. `INV-2025-`.
    async fn find_highest_number_with_prefix(&self, prefix: &str) -> Result<Option<String>>;

    async fn create_invoice(&self, invoice: InsertInvoiceEntity) -> Result<InvoiceEntity>;

    async fn list_invoices(&self, status: Option<String>) -> Result<Vec<InvoiceEntity>>;

    async fn update_status(
        &self,
        invoice_id: Uuid,
        status: &str,
        amount_paid: i32,
        amount_due: i32,
    ) -> Result<InvoiceEntity>;

    async fn record_reminder(
        &self,
        invoice_id: Uuid,
        next_reminder_date: NaiveDate,
    ) -> Result<InvoiceEntity>;
}
