use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::{
    Connection, OptionalExtension, RunQueryDsl,
    dsl::{count_star, exists, not},
    insert_into,
    prelude::*,
    update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{bookings, event_details, invoices},
    },
};
use domain::{
    entities::{
        bookings::{BookingEntity, InsertBookingEntity},
        event_details::EventDetailsEntity,
    },
    repositories::bookings::BookingRepository,
    value_objects::enums::{
        booking_statuses::BookingStatus, payment_statuses::PaymentStatus,
        service_families::ServiceFamily,
    },
};

pub struct BookingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BookingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BookingRepository for BookingPostgres {
    async fn create_booking_with_details(
        &self,
        booking: InsertBookingEntity,
        mut details: EventDetailsEntity,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking_id = conn.transaction::<Uuid, diesel::result::Error, _>(|tx| {
            let booking_id = insert_into(bookings::table)
                .values(&booking)
                .returning(bookings::id)
                .get_result::<Uuid>(tx)?;

            details.booking_id = booking_id;
            insert_into(event_details::table)
                .values(&details)
                .execute(tx)?;

            Ok(booking_id)
        })?;

        Ok(booking_id)
    }

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking = bookings::table
            .filter(bookings::id.eq(booking_id))
            .select(BookingEntity::as_select())
            .first::<BookingEntity>(&mut conn)
            .optional()?;

        Ok(booking)
    }

    async fn find_event_details(&self, booking_id: Uuid) -> Result<Option<EventDetailsEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let details = event_details::table
            .filter(event_details::booking_id.eq(booking_id))
            .select(EventDetailsEntity::as_select())
            .first::<EventDetailsEntity>(&mut conn)
            .optional()?;

        Ok(details)
    }

    async fn count_active_photobooth_bookings(&self, event_date: NaiveDate) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = bookings::table
            .filter(bookings::service_type.eq(ServiceFamily::Photobooth.as_str()))
            .filter(bookings::event_date.eq(event_date))
            .filter(bookings::status.ne(BookingStatus::Cancelled.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn count_active_photobooth_bookings_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, i64)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let counts = bookings::table
            .filter(bookings::service_type.eq(ServiceFamily::Photobooth.as_str()))
            .filter(bookings::event_date.between(from, to))
            .filter(bookings::status.ne(BookingStatus::Cancelled.as_str()))
            .group_by(bookings::event_date)
            .select((bookings::event_date, count_star()))
            .load::<(NaiveDate, i64)>(&mut conn)?;

        Ok(counts)
    }

    async fn attach_payment_intent(
        &self,
        booking_id: Uuid,
        payment_intent_id: &str,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(bookings::table.filter(bookings::id.eq(booking_id)))
            .set((
                bookings::payment_intent_id.eq(Some(payment_intent_id)),
                bookings::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn mark_paid(
        &self,
        booking_id: Uuid,
        payment_intent_id: Option<String>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        // Conditional update: only the first confirmation sees a changed row.
        let target = update(bookings::table)
            .filter(bookings::id.eq(booking_id))
            .filter(bookings::payment_status.ne(PaymentStatus::Paid.as_str()));

        let updated = match payment_intent_id {
            Some(intent_id) => target
                .set((
                    bookings::payment_status.eq(PaymentStatus::Paid.as_str()),
                    bookings::status.eq(BookingStatus::Confirmed.as_str()),
                    bookings::payment_intent_id.eq(Some(intent_id)),
                    bookings::updated_at.eq(now),
                ))
                .execute(&mut conn)?,
            None => target
                .set((
                    bookings::payment_status.eq(PaymentStatus::Paid.as_str()),
                    bookings::status.eq(BookingStatus::Confirmed.as_str()),
                    bookings::updated_at.eq(now),
                ))
                .execute(&mut conn)?,
        };

        Ok(updated > 0)
    }

    async fn mark_payment_failed(&self, booking_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // A paid booking is never undone by a late failure event.
        let updated = update(bookings::table)
            .filter(bookings::id.eq(booking_id))
            .filter(bookings::payment_status.eq(PaymentStatus::Pending.as_str()))
            .set((
                bookings::payment_status.eq(PaymentStatus::Failed.as_str()),
                bookings::status.eq(BookingStatus::Cancelled.as_str()),
                bookings::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    async fn list_paid_without_invoice(&self) -> Result<Vec<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = bookings::table
            .filter(bookings::payment_status.eq(PaymentStatus::Paid.as_str()))
            .filter(not(exists(
                invoices::table.filter(invoices::booking_id.eq(bookings::id)),
            )))
            .order(bookings::created_at.asc())
            .select(BookingEntity::as_select())
            .load::<BookingEntity>(&mut conn)?;

        Ok(results)
    }
}
