use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::invoices;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
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
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct InsertInvoiceEntity {
    pub booking_id: Uuid,
    pub invoice_number: String,
    pub total: i32,
    pub amount_paid: i32,
    pub amount_due: i32,
    pub status: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}
