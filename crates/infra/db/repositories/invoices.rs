use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::invoices},
};
use domain::{
    entities::invoices::{InsertInvoiceEntity, InvoiceEntity},
    repositories::invoices::InvoiceRepository,
    value_objects::invoices::highest_invoice_number,
};

pub struct InvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn find_by_booking_id(&self, booking_id: Uuid) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = invoices::table
            .filter(invoices::booking_id.eq(booking_id))
            .select(InvoiceEntity::as_select())
            .first::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(invoice)
    }

    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = invoices::table
            .filter(invoices::id.eq(invoice_id))
            .select(InvoiceEntity::as_select())
            .first::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(invoice)
    }

    async fn find_highest_number_with_prefix(&self, prefix: &str) -> Result<Option<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let numbers = invoices::table
            .filter(invoices::invoice_number.like(format!("{}%", prefix)))
            .select(invoices::invoice_number)
            .load::<String>(&mut conn)?;

        Ok(highest_invoice_number(prefix, numbers))
    }

    async fn create_invoice(&self, invoice: InsertInvoiceEntity) -> Result<InvoiceEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let created = insert_into(invoices::table)
            .values(&invoice)
            .returning(InvoiceEntity::as_returning())
            .get_result::<InvoiceEntity>(&mut conn)?;

        Ok(created)
    }

    async fn list_invoices(&self, status: Option<String>) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = invoices::table
            .select(InvoiceEntity::as_select())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(invoices::status.eq(status));
        }

        let results = query
            .order(invoices::created_at.desc())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update_status(
        &self,
        invoice_id: Uuid,
        status: &str,
        amount_paid: i32,
        amount_due: i32,
    ) -> Result<InvoiceEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set((
                invoices::status.eq(status),
                invoices::amount_paid.eq(amount_paid),
                invoices::amount_due.eq(amount_due),
                invoices::updated_at.eq(Utc::now()),
            ))
            .returning(InvoiceEntity::as_returning())
            .get_result::<InvoiceEntity>(&mut conn)?;

        Ok(updated)
    }

    async fn record_reminder(
        &self,
        invoice_id: Uuid,
        next_reminder_date: NaiveDate,
    ) -> Result<InvoiceEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        let updated = update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set((
                invoices::reminder_count.eq(invoices::reminder_count + 1),
                invoices::last_reminder_sent_at.eq(Some(now)),
                invoices::next_reminder_date.eq(Some(next_reminder_date)),
                invoices::updated_at.eq(now),
            ))
            .returning(InvoiceEntity::as_returning())
            .get_result::<InvoiceEntity>(&mut conn)?;

        Ok(updated)
    }
}
