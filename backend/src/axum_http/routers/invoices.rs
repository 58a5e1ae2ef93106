use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use crates::{
    domain::{
        repositories::{bookings::BookingRepository, invoices::InvoiceRepository},
        value_objects::invoices::{
            CreateInvoiceRequest, ListInvoicesQuery, UpdateInvoiceStatusRequest,
        },
    },
    notifications::NotificationGateway,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AdminUser, axum_http::error_responses::ApiJson, usecases::invoices::InvoiceUseCase,
};

// Every invoice route is staff-only.
pub fn routes<I, B, N>(invoice_usecase: Arc<InvoiceUseCase<I, B, N>>) -> Router
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(create::<I, B, N>).get(list::<I, B, N>))
        .route("/auto-generate", post(auto_generate::<I, B, N>))
        .route("/:invoice_id", get(get_invoice::<I, B, N>))
        .route("/:invoice_id/status", patch(update_status::<I, B, N>))
        .route("/:invoice_id/reminder", post(send_reminder::<I, B, N>))
        .with_state(invoice_usecase)
}

pub async fn create<I, B, N>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, B, N>>>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateInvoiceRequest>,
) -> Response
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    match invoice_usecase.create_for_booking(request.booking_id).await {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list<I, B, N>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, B, N>>>,
    _admin: AdminUser,
    Query(query): Query<ListInvoicesQuery>,
) -> Response
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    match invoice_usecase.list(query).await {
        Ok(invoices) => Json(invoices).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_invoice<I, B, N>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, B, N>>>,
    _admin: AdminUser,
    Path(invoice_id): Path<Uuid>,
) -> Response
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    match invoice_usecase.get(invoice_id).await {
        Ok(invoice) => Json(invoice).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_status<I, B, N>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, B, N>>>,
    AdminUser(admin): AdminUser,
    Path(invoice_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateInvoiceStatusRequest>,
) -> Response
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, %invoice_id, status = %request.status, "invoices router: update_status");
    match invoice_usecase.set_status(invoice_id, request).await {
        Ok(invoice) => Json(invoice).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn send_reminder<I, B, N>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, B, N>>>,
    _admin: AdminUser,
    Path(invoice_id): Path<Uuid>,
) -> Response
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    match invoice_usecase.send_reminder(invoice_id).await {
        Ok(invoice) => Json(invoice).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn auto_generate<I, B, N>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, B, N>>>,
    AdminUser(admin): AdminUser,
) -> Response
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, "invoices router: auto_generate");
    match invoice_usecase.auto_generate_missing().await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => err.into_response(),
    }
}
