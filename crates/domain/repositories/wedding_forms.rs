use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

#[async_trait]
#[automock]
pub trait WeddingFormRepository {
    /// Seeds the pending planning form for a wedding booking. Returns true when
    /// a row was written.
    async fn create_if_absent(&self, booking_id: Uuid, user_id: Uuid) -> Result<bool>;
}
