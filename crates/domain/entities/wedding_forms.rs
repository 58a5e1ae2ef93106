use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::wedding_forms;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = wedding_forms)]
pub struct WeddingFormEntity {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wedding_forms)]
pub struct InsertWeddingFormEntity {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
}
