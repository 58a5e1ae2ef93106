use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::availability_blocks::{
    AvailabilityBlockEntity, InsertAvailabilityBlockEntity,
};

#[async_trait]
#[automock]
pub trait AvailabilityBlockRepository {
    async fn find_block(
        &self,
        service_provider: &str,
        block_date: NaiveDate,
    ) -> Result<Option<AvailabilityBlockEntity>>;

    async fn list_blocks(
        &self,
        service_provider: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AvailabilityBlockEntity>>;

    async fn create_block(&self, block: InsertAvailabilityBlockEntity) -> Result<Uuid>;

    /// Returns false when no block had that id.
    async fn delete_block(&self, block_id: Uuid) -> Result<bool>;
}
