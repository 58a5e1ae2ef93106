use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::wedding_forms},
};
use domain::{
    entities::wedding_forms::InsertWeddingFormEntity,
    repositories::wedding_forms::WeddingFormRepository,
};

pub struct WeddingFormPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl WeddingFormPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WeddingFormRepository for WeddingFormPostgres {
    async fn create_if_absent(&self, booking_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let existing = wedding_forms::table
            .filter(wedding_forms::booking_id.eq(booking_id))
            .select(wedding_forms::id)
            .first::<Uuid>(&mut conn)
            .optional()?;

        if existing.is_some() {
            return Ok(false);
        }

        insert_into(wedding_forms::table)
            .values(&InsertWeddingFormEntity {
                booking_id,
                user_id,
                status: "pending".to_string(),
            })
            .execute(&mut conn)?;

        Ok(true)
    }
}
