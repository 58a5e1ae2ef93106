use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            availability_blocks::AvailabilityBlockRepository, bookings::BookingRepository,
            invoices::InvoiceRepository, time_slots::TimeSlotRepository,
            wedding_forms::WeddingFormRepository,
        },
        value_objects::bookings::CreateBookingRequest,
    },
    notifications::NotificationGateway,
};
use uuid::Uuid;

use crate::{
    auth::AuthUser, axum_http::error_responses::ApiJson, usecases::bookings::BookingUseCase,
};

pub fn routes<A, S, B, I, W, N>(booking_usecase: Arc<BookingUseCase<A, S, B, I, W, N>>) -> Router
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    W: WeddingFormRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/create", post(create::<A, S, B, I, W, N>))
        .route("/:booking_id", get(get_booking::<A, S, B, I, W, N>))
        .with_state(booking_usecase)
}

pub async fn create<A, S, B, I, W, N>(
    State(booking_usecase): State<Arc<BookingUseCase<A, S, B, I, W, N>>>,
    auth: AuthUser,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Response
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    W: WeddingFormRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    match booking_usecase
        .create_booking(&auth.as_owner(), request)
        .await
    {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_booking<A, S, B, I, W, N>(
    State(booking_usecase): State<Arc<BookingUseCase<A, S, B, I, W, N>>>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Response
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    W: WeddingFormRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    match booking_usecase
        .get_booking(&auth.as_owner(), booking_id)
        .await
    {
        Ok(booking) => Json(booking).into_response(),
        Err(err) => err.into_response(),
    }
}
