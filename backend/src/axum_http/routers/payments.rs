use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use crates::domain::{
    repositories::bookings::BookingRepository,
    value_objects::bookings::{
        ConfirmPaymentRequest, CreatePaymentIntentRequest, PaymentSuccessQuery,
    },
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    auth::AuthUser,
    axum_http::error_responses::ApiJson,
    usecases::{
        bookings::BookingConfirmation,
        error::BookingError,
        payments::{PaymentGateway, PaymentUseCase},
    },
};

const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

pub fn routes<B, C, G>(payment_usecase: Arc<PaymentUseCase<B, C, G>>) -> Router
where
    B: BookingRepository + Send + Sync + 'static,
    C: BookingConfirmation + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/create-intent", post(create_intent::<B, C, G>))
        .route("/confirm", post(confirm::<B, C, G>))
        .route("/webhook", post(webhook::<B, C, G>))
        .route("/success", get(success::<B, C, G>))
        .with_state(payment_usecase)
}

pub async fn create_intent<B, C, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<B, C, G>>>,
    auth: AuthUser,
    ApiJson(request): ApiJson<CreatePaymentIntentRequest>,
) -> Response
where
    B: BookingRepository + Send + Sync + 'static,
    C: BookingConfirmation + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    match payment_usecase
        .create_intent(&auth.as_owner(), request.booking_id)
        .await
    {
        Ok(intent) => Json(intent).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn confirm<B, C, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<B, C, G>>>,
    auth: AuthUser,
    ApiJson(request): ApiJson<ConfirmPaymentRequest>,
) -> Response
where
    B: BookingRepository + Send + Sync + 'static,
    C: BookingConfirmation + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    match payment_usecase
        .confirm_direct(&auth.as_owner(), request)
        .await
    {
        Ok(confirmed) => Json(confirmed).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Stripe posts the raw event body; the signature covers the exact bytes so the
/// body must not go through a JSON extractor first.
pub async fn webhook<B, C, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<B, C, G>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    B: BookingRepository + Send + Sync + 'static,
    C: BookingConfirmation + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let Some(signature) = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        warn!("payments router: webhook without stripe-signature header");
        return BookingError::Validation("missing stripe-signature header".to_string())
            .into_response();
    };

    match payment_usecase.handle_webhook(&body, signature).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "received": true }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn success<B, C, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<B, C, G>>>,
    Query(query): Query<PaymentSuccessQuery>,
) -> Redirect
where
    B: BookingRepository + Send + Sync + 'static,
    C: BookingConfirmation + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let booking_id = query.booking_id;
    let target = payment_usecase.handle_success_redirect(query).await;
    info!(%booking_id, %target, "payments router: redirecting after checkout");
    Redirect::to(&target)
}
