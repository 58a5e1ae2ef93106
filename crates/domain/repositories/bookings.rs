use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    bookings::{BookingEntity, InsertBookingEntity},
    event_details::EventDetailsEntity,
};

#[async_trait]
#[automock]
pub trait BookingRepository {
    /// Inserts the booking and its event details together; `booking_id` on the
    /// details is overwritten with the new row's id.
    async fn create_booking_with_details(
        &self,
        booking: InsertBookingEntity,
        details: EventDetailsEntity,
    ) -> Result<Uuid>;

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<BookingEntity>>;

    async fn find_event_details(&self, booking_id: Uuid) -> Result<Option<EventDetailsEntity>>;

    /// Non-cancelled photobooth-family bookings on the date, across all units.
    async fn count_active_photobooth_bookings(&self, event_date: NaiveDate) -> Result<i64>;

    async fn count_active_photobooth_bookings_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, i64)>>;

    async fn attach_payment_intent(&self, booking_id: Uuid, payment_intent_id: &str)
    -> Result<()>;

    /// Moves the booking to paid/confirmed. Returns true only if this call
    /// performed the transition.
    async fn mark_paid(&self, booking_id: Uuid, payment_intent_id: Option<String>)
    -> Result<bool>;

    /// Moves the booking to failed/cancelled. Returns true only if this call
    /// performed the transition.
    async fn mark_payment_failed(&self, booking_id: Uuid) -> Result<bool>;

    async fn list_paid_without_invoice(&self) -> Result<Vec<BookingEntity>>;
}
