use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
    usecases::{
        availability::AvailabilityUseCase, bookings::BookingUseCase, invoices::InvoiceUseCase,
        payments::PaymentUseCase,
    },
};
use anyhow::Result;
use axum::{
    Router,
    http::{
        HeaderValue, Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use crates::{
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            availability_blocks::AvailabilityBlockPostgres, bookings::BookingPostgres,
            invoices::InvoicePostgres, time_slots::TimeSlotPostgres,
            wedding_forms::WeddingFormPostgres,
        },
    },
    notifications::{Notifier, ResendEmailProvider, TwilioSmsProvider},
    payments::stripe_client::StripeClient,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use url::Url;

fn build_notifier(config: &DotEnvyConfig) -> Result<Notifier> {
    let email = config
        .email
        .as_ref()
        .map(|email| ResendEmailProvider::new(email.api_key.clone(), email.from.clone()))
        .transpose()?;

    let sms = config
        .sms
        .as_ref()
        .map(|sms| {
            TwilioSmsProvider::new(
                sms.account_sid.clone(),
                sms.auth_token.clone(),
                sms.from_number.clone(),
            )
        })
        .transpose()?;

    Ok(Notifier::new(
        email,
        sms,
        config.admin.alert_phone.clone(),
        config.frontend.base_url.clone(),
    ))
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let block_repository = Arc::new(AvailabilityBlockPostgres::new(Arc::clone(&db_pool)));
    let slot_repository = Arc::new(TimeSlotPostgres::new(Arc::clone(&db_pool)));
    let booking_repository = Arc::new(BookingPostgres::new(Arc::clone(&db_pool)));
    let invoice_repository = Arc::new(InvoicePostgres::new(Arc::clone(&db_pool)));
    let wedding_form_repository = Arc::new(WeddingFormPostgres::new(Arc::clone(&db_pool)));

    let notifier = Arc::new(build_notifier(&config)?);
    let stripe_client = Arc::new(StripeClient::new(
        config.stripe.secret_key.clone(),
        config.stripe.webhook_secret.clone(),
        config.stripe.currency.clone(),
    ));

    let availability_usecase = Arc::new(AvailabilityUseCase::new(
        Arc::clone(&block_repository),
        Arc::clone(&slot_repository),
        Arc::clone(&booking_repository),
    ));
    let invoice_usecase = Arc::new(InvoiceUseCase::new(
        Arc::clone(&invoice_repository),
        Arc::clone(&booking_repository),
        Arc::clone(&notifier),
    ));
    let booking_usecase = Arc::new(BookingUseCase::new(
        Arc::clone(&availability_usecase),
        Arc::clone(&invoice_usecase),
        Arc::clone(&booking_repository),
        Arc::clone(&slot_repository),
        Arc::clone(&wedding_form_repository),
        Arc::clone(&notifier),
    ));
    let payment_usecase = Arc::new(PaymentUseCase::new(
        Arc::clone(&booking_repository),
        Arc::clone(&booking_usecase),
        stripe_client,
        config.frontend.base_url.clone(),
    ));

    let frontend_origin = HeaderValue::from_str(
        &Url::parse(&config.frontend.base_url)?
            .origin()
            .ascii_serialization(),
    )?;

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/availability",
            routers::availability::routes(availability_usecase),
        )
        .nest("/api/v1/bookings", routers::bookings::routes(booking_usecase))
        .nest("/api/v1/payment", routers::payments::routes(payment_usecase))
        .nest("/api/v1/invoices", routers::invoices::routes(invoice_usecase))
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(request_timeout(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(frontend_origin),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.backend_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Requests still running after `limit` are answered with 408.
fn request_timeout(limit: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, limit)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn slow_request_times_out_with_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(request_timeout(Duration::from_millis(20)));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn fast_request_passes_through() {
        let app = Router::new()
            .route("/fast", get(|| async { "done" }))
            .layer(request_timeout(Duration::from_secs(5)));

        let response = app
            .oneshot(Request::builder().uri("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
