use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::bookings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = bookings)]
pub struct BookingEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_email: Option<String>,
    pub service_type: String,
    pub service_provider: String,
    pub event_date: NaiveDate,
    pub event_start_time: String,
    pub event_end_time: String,
    pub total_price: i32,
    pub payment_status: String,
    pub status: String,
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct InsertBookingEntity {
    pub user_id: Uuid,
    pub customer_email: Option<String>,
    pub service_type: String,
    pub service_provider: String,
    pub event_date: NaiveDate,
    pub event_start_time: String,
    pub event_end_time: String,
    pub total_price: i32,
    pub payment_status: String,
    pub status: String,
}
