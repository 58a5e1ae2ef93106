use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::infra::db::postgres::schema::availability_blocks;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Serialize)]
#[diesel(table_name = availability_blocks)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBlockEntity {
    pub id: Uuid,
    pub service_provider: String,
    pub block_date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = availability_blocks)]
pub struct InsertAvailabilityBlockEntity {
    pub service_provider: String,
    pub block_date: NaiveDate,
    pub reason: Option<String>,
}
