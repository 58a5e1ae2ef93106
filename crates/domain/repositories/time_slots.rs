use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::time_slots::{InsertTimeSlotEntity, TimeSlotEntity};

/// The calendar as the availability engine sees it. Only confirmed slots block
/// a DJ's day, and a slot exists only for a paid booking.
#[async_trait]
#[automock]
pub trait TimeSlotRepository {
    /// Confirmed slots for the provider on the date, ordered by start time.
    async fn list_confirmed_slots(
        &self,
        service_provider: &str,
        event_date: NaiveDate,
    ) -> Result<Vec<TimeSlotEntity>>;

    async fn list_confirmed_slots_between(
        &self,
        service_provider: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSlotEntity>>;

    /// Inserts the slot unless one already exists for its booking. Returns true
    /// when a row was written.
    async fn create_slot_if_absent(&self, slot: InsertTimeSlotEntity) -> Result<bool>;

    /// Cancels every slot of the booking and returns how many changed.
    async fn cancel_slots_for_booking(&self, booking_id: Uuid) -> Result<usize>;
}
