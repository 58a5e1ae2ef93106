use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::booking_time_slots},
};
use domain::{
    entities::time_slots::{InsertTimeSlotEntity, TimeSlotEntity},
    repositories::time_slots::TimeSlotRepository,
    value_objects::enums::time_slot_statuses::TimeSlotStatus,
};

pub struct TimeSlotPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TimeSlotPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TimeSlotRepository for TimeSlotPostgres {
    async fn list_confirmed_slots(
        &self,
        service_provider: &str,
        event_date: NaiveDate,
    ) -> Result<Vec<TimeSlotEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let slots = booking_time_slots::table
            .filter(booking_time_slots::service_provider.eq(service_provider))
            .filter(booking_time_slots::event_date.eq(event_date))
            .filter(booking_time_slots::status.eq(TimeSlotStatus::Confirmed.to_string()))
            .order(booking_time_slots::start_time.asc())
            .select(TimeSlotEntity::as_select())
            .load::<TimeSlotEntity>(&mut conn)?;

        Ok(slots)
    }

    async fn list_confirmed_slots_between(
        &self,
        service_provider: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSlotEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let slots = booking_time_slots::table
            .filter(booking_time_slots::service_provider.eq(service_provider))
            .filter(booking_time_slots::event_date.between(from, to))
            .filter(booking_time_slots::status.eq(TimeSlotStatus::Confirmed.to_string()))
            .order((
                booking_time_slots::event_date.asc(),
                booking_time_slots::start_time.asc(),
            ))
            .select(TimeSlotEntity::as_select())
            .load::<TimeSlotEntity>(&mut conn)?;

        Ok(slots)
    }

    // Check-then-insert across two statements. Safe for repeated confirmations of
    // the same booking because every entry point keys off the same booking id; a
    // unique index on booking_id would make the guard atomic.
    async fn create_slot_if_absent(&self, slot: InsertTimeSlotEntity) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let confirmed = TimeSlotStatus::Confirmed.to_string();

        let existing = booking_time_slots::table
            .filter(booking_time_slots::booking_id.eq(slot.booking_id))
            .select(TimeSlotEntity::as_select())
            .first::<TimeSlotEntity>(&mut conn)
            .optional()?;

        match existing {
            Some(existing) if existing.status == confirmed => Ok(false),
            Some(existing) => {
                update(booking_time_slots::table.filter(booking_time_slots::id.eq(existing.id)))
                    .set(booking_time_slots::status.eq(confirmed))
                    .execute(&mut conn)?;
                Ok(true)
            }
            None => {
                insert_into(booking_time_slots::table)
                    .values(&slot)
                    .execute(&mut conn)?;
                Ok(true)
            }
        }
    }

    async fn cancel_slots_for_booking(&self, booking_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let cancelled = TimeSlotStatus::Cancelled.to_string();

        let updated = update(booking_time_slots::table)
            .filter(booking_time_slots::booking_id.eq(booking_id))
            .filter(booking_time_slots::status.ne(&cancelled))
            .set(booking_time_slots::status.eq(&cancelled))
            .execute(&mut conn)?;

        Ok(updated)
    }
}
