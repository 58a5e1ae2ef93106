use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::booking_time_slots;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = booking_time_slots)]
pub struct TimeSlotEntity {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub service_provider: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = booking_time_slots)]
pub struct InsertTimeSlotEntity {
    pub booking_id: Uuid,
    pub service_provider: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}
