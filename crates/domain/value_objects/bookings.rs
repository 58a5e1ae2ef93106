use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{bookings::BookingEntity, event_details::EventDetailsEntity};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
    pub provider: String,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsModel {
    pub event_name: Option<String>,
    pub event_type: String,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub guest_count: Option<i32>,
    pub special_requests: Option<String>,
}

impl EventDetailsModel {
    pub fn into_entity(self, booking_id: Uuid) -> EventDetailsEntity {
        EventDetailsEntity {
            booking_id,
            event_name: self.event_name,
            event_type: self.event_type,
            venue_name: self.venue_name,
            venue_address: self.venue_address,
            guest_count: self.guest_count,
            special_requests: self.special_requests,
        }
    }
}

impl From<EventDetailsEntity> for EventDetailsModel {
    fn from(value: EventDetailsEntity) -> Self {
        Self {
            event_name: value.event_name,
            event_type: value.event_type,
            venue_name: value.venue_name,
            venue_address: value.venue_address,
            guest_count: value.guest_count,
            special_requests: value.special_requests,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_type: String,
    pub service_provider: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub event_details: EventDetailsModel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking_id: Uuid,
    pub total_price: i32,
    pub next_step: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: Uuid,
    pub service_type: String,
    pub service_provider: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub total_price: i32,
    pub payment_status: String,
    pub status: String,
    pub event_details: Option<EventDetailsModel>,
    pub created_at: DateTime<Utc>,
}

impl BookingDto {
    pub fn from_entities(booking: BookingEntity, details: Option<EventDetailsEntity>) -> Self {
        Self {
            id: booking.id,
            service_type: booking.service_type,
            service_provider: booking.service_provider,
            event_date: booking.event_date,
            start_time: booking.event_start_time,
            end_time: booking.event_end_time,
            total_price: booking.total_price,
            payment_status: booking.payment_status,
            status: booking.status,
            event_details: details.map(EventDetailsModel::from),
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    pub booking_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub booking_id: Uuid,
    pub payment_intent_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentResponse {
    pub success: bool,
    pub is_wedding: bool,
    pub booking_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSuccessQuery {
    pub booking_id: Uuid,
    pub payment_intent: Option<String>,
}

/// Outcome of a confirmation, whichever entry point triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationOutcome {
    pub booking_id: Uuid,
    pub is_wedding: bool,
    /// True only for the call that moved the booking to paid.
    pub transitioned: bool,
    pub slot_created: bool,
    pub invoice_number: Option<String>,
}
