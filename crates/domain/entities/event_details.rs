use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::event_details;

#[derive(Debug, Clone, Selectable, Queryable, Insertable)]
#[diesel(table_name = event_details)]
pub struct EventDetailsEntity {
    pub booking_id: Uuid,
    pub event_name: Option<String>,
    pub event_type: String,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub guest_count: Option<i32>,
    pub special_requests: Option<String>,
}
