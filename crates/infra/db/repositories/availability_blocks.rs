use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::{OptionalExtension, RunQueryDsl, delete, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::availability_blocks},
};
use domain::{
    entities::availability_blocks::{AvailabilityBlockEntity, InsertAvailabilityBlockEntity},
    repositories::availability_blocks::AvailabilityBlockRepository,
};

pub struct AvailabilityBlockPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AvailabilityBlockPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AvailabilityBlockRepository for AvailabilityBlockPostgres {
    async fn find_block(
        &self,
        service_provider: &str,
        block_date: NaiveDate,
    ) -> Result<Option<AvailabilityBlockEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let block = availability_blocks::table
            .filter(availability_blocks::service_provider.eq(service_provider))
            .filter(availability_blocks::block_date.eq(block_date))
            .select(AvailabilityBlockEntity::as_select())
            .first::<AvailabilityBlockEntity>(&mut conn)
            .optional()?;

        Ok(block)
    }

    async fn list_blocks(
        &self,
        service_provider: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AvailabilityBlockEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let blocks = availability_blocks::table
            .filter(availability_blocks::service_provider.eq(service_provider))
            .filter(availability_blocks::block_date.between(from, to))
            .order(availability_blocks::block_date.asc())
            .select(AvailabilityBlockEntity::as_select())
            .load::<AvailabilityBlockEntity>(&mut conn)?;

        Ok(blocks)
    }

    async fn create_block(&self, block: InsertAvailabilityBlockEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let block_id = insert_into(availability_blocks::table)
            .values(&block)
            .returning(availability_blocks::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(block_id)
    }

    async fn delete_block(&self, block_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(availability_blocks::table.filter(availability_blocks::id.eq(block_id)))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
