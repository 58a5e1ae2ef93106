use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use crates::domain::{
    repositories::{
        availability_blocks::AvailabilityBlockRepository, bookings::BookingRepository,
        time_slots::TimeSlotRepository,
    },
    value_objects::{
        availability::{CreateAvailabilityBlockRequest, ListAvailabilityBlocksQuery},
        bookings::CheckAvailabilityRequest,
    },
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AdminUser, axum_http::error_responses::ApiJson,
    usecases::availability::AvailabilityUseCase,
};

pub fn routes<A, S, B>(availability_usecase: Arc<AvailabilityUseCase<A, S, B>>) -> Router
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/check", post(check::<A, S, B>))
        .route("/blocks", post(create_block::<A, S, B>))
        // Listing takes a provider and deletion a block id in the same position.
        .route(
            "/blocks/:target",
            get(list_blocks::<A, S, B>).delete(delete_block::<A, S, B>),
        )
        .route("/:provider/:year/:month", get(month_overview::<A, S, B>))
        .with_state(availability_usecase)
}

pub async fn check<A, S, B>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<A, S, B>>>,
    ApiJson(request): ApiJson<CheckAvailabilityRequest>,
) -> Response
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    match availability_usecase.check_availability(request).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn month_overview<A, S, B>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<A, S, B>>>,
    Path((provider, year, month)): Path<(String, i32, u32)>,
) -> Response
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    match availability_usecase
        .month_overview(&provider, year, month)
        .await
    {
        Ok(days) => Json(days).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_block<A, S, B>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<A, S, B>>>,
    AdminUser(admin): AdminUser,
    ApiJson(request): ApiJson<CreateAvailabilityBlockRequest>,
) -> Response
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, provider = %request.provider, date = %request.date, "availability router: create_block");
    match availability_usecase.create_block(request).await {
        Ok(block_id) => (StatusCode::CREATED, Json(json!({ "id": block_id }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_blocks<A, S, B>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<A, S, B>>>,
    _admin: AdminUser,
    Path(provider): Path<String>,
    Query(query): Query<ListAvailabilityBlocksQuery>,
) -> Response
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    match availability_usecase.list_blocks(&provider, query).await {
        Ok(blocks) => Json(blocks).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_block<A, S, B>(
    State(availability_usecase): State<Arc<AvailabilityUseCase<A, S, B>>>,
    AdminUser(admin): AdminUser,
    Path(block_id): Path<Uuid>,
) -> Response
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, %block_id, "availability router: delete_block");
    match availability_usecase.delete_block(block_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
