use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use crates::{
    domain::{
        entities::bookings::BookingEntity,
        repositories::bookings::BookingRepository,
        value_objects::{
            bookings::{
                ConfirmPaymentRequest, ConfirmPaymentResponse, CreatePaymentIntentResponse,
                PaymentSuccessQuery,
            },
            enums::booking_statuses::BookingLifecycle,
        },
    },
    payments::stripe_client::{StripeClient, StripeEvent, StripePaymentIntent},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{
    bookings::{BookingConfirmation, BookingOwner},
    error::{BookingError, UseCaseResult},
};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        amount: i64,
        booking_id: Uuid,
        receipt_email: Option<String>,
    ) -> AnyResult<StripePaymentIntent>;

    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> AnyResult<StripePaymentIntent>;

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> AnyResult<StripeEvent>;
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_payment_intent(
        &self,
        amount: i64,
        booking_id: Uuid,
        receipt_email: Option<String>,
    ) -> AnyResult<StripePaymentIntent> {
        self.create_payment_intent(amount, booking_id, receipt_email.as_deref())
            .await
    }

    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> AnyResult<StripePaymentIntent> {
        self.retrieve_payment_intent(payment_intent_id).await
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> AnyResult<StripeEvent> {
        self.verify_webhook_signature(payload, signature)
    }
}

pub struct PaymentUseCase<B, C, G>
where
    B: BookingRepository + Send + Sync + 'static,
    C: BookingConfirmation + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    booking_repo: Arc<B>,
    confirmation: Arc<C>,
    gateway: Arc<G>,
    frontend_base_url: String,
}

impl<B, C, G> PaymentUseCase<B, C, G>
where
    B: BookingRepository + Send + Sync + 'static,
    C: BookingConfirmation + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(
        booking_repo: Arc<B>,
        confirmation: Arc<C>,
        gateway: Arc<G>,
        frontend_base_url: String,
    ) -> Self {
        Self {
            booking_repo,
            confirmation,
            gateway,
            frontend_base_url: frontend_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn load_owned(&self, owner: &BookingOwner, booking_id: Uuid) -> UseCaseResult<BookingEntity> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "payments: failed to load booking");
                BookingError::Internal(err)
            })?
            .ok_or(BookingError::NotFound("booking"))?;

        if booking.user_id != owner.user_id && !owner.is_admin {
            warn!(user_id = %owner.user_id, %booking_id, "payments: booking requested by non-owner");
            return Err(BookingError::NotFound("booking"));
        }

        Ok(booking)
    }

    pub async fn create_intent(
        &self,
        owner: &BookingOwner,
        booking_id: Uuid,
    ) -> UseCaseResult<CreatePaymentIntentResponse> {
        let booking = self.load_owned(owner, booking_id).await?;

        match BookingLifecycle::from_columns(&booking.status, &booking.payment_status) {
            BookingLifecycle::Pending | BookingLifecycle::Failed => {}
            BookingLifecycle::Paid => {
                return Err(BookingError::Validation(
                    "Booking is already paid".to_string(),
                ));
            }
            BookingLifecycle::Cancelled => {
                return Err(BookingError::Validation(
                    "Booking has been cancelled".to_string(),
                ));
            }
        }

        let intent = self
            .gateway
            .create_payment_intent(
                i64::from(booking.total_price),
                booking_id,
                booking.customer_email.clone(),
            )
            .await
            .map_err(|err| {
                error!(%booking_id, error = ?err, "payments: payment intent creation failed");
                BookingError::Gateway(err)
            })?;

        let client_secret = intent.client_secret.clone().ok_or_else(|| {
            error!(%booking_id, payment_intent_id = %intent.id, "payments: intent returned without client secret");
            BookingError::Gateway(anyhow::anyhow!("payment intent is missing client_secret"))
        })?;

        self.booking_repo
            .attach_payment_intent(booking_id, &intent.id)
            .await
            .map_err(|err| {
                error!(%booking_id, payment_intent_id = %intent.id, db_error = ?err, "payments: failed to attach intent");
                BookingError::Internal(err)
            })?;

        info!(%booking_id, payment_intent_id = %intent.id, amount = booking.total_price, "payments: payment intent created");

        Ok(CreatePaymentIntentResponse {
            client_secret,
            payment_intent_id: intent.id,
            amount: booking.total_price,
        })
    }

    /// Client-side confirmation after the payment form succeeds. The intent is
    /// re-read from the gateway so a client cannot mark its own booking paid.
    pub async fn confirm_direct(
        &self,
        owner: &BookingOwner,
        request: ConfirmPaymentRequest,
    ) -> UseCaseResult<ConfirmPaymentResponse> {
        let booking_id = request.booking_id;
        self.load_owned(owner, booking_id).await?;

        let intent = self
            .gateway
            .retrieve_payment_intent(&request.payment_intent_id)
            .await
            .map_err(|err| {
                error!(%booking_id, payment_intent_id = %request.payment_intent_id, error = ?err, "payments: failed to retrieve intent");
                BookingError::Gateway(err)
            })?;

        if intent.booking_id().is_some_and(|tagged| tagged != booking_id) {
            warn!(%booking_id, payment_intent_id = %intent.id, "payments: intent belongs to another booking");
            return Err(BookingError::Validation(
                "Payment does not belong to this booking".to_string(),
            ));
        }

        if !intent.is_succeeded() {
            warn!(%booking_id, payment_intent_id = %intent.id, intent_status = %intent.status, "payments: intent not succeeded");
            return Err(BookingError::Validation(format!(
                "Payment has not succeeded (status: {})",
                intent.status
            )));
        }

        let outcome = self
            .confirmation
            .confirm_payment(booking_id, Some(intent.id))
            .await?;

        Ok(ConfirmPaymentResponse {
            success: true,
            is_wedding: outcome.is_wedding,
            booking_id,
        })
    }

    pub async fn handle_webhook(&self, payload: &[u8], signature: &str) -> UseCaseResult<()> {
        let event = self
            .gateway
            .verify_webhook_signature(payload, signature)
            .map_err(|err| {
                warn!(error = %err, "payments: stripe webhook verification failed");
                BookingError::Validation("invalid webhook signature".to_string())
            })?;

        info!(event_id = ?event.id, event_type = %event.type_, "payments: stripe webhook verified");

        let result = match event.type_.as_str() {
            "payment_intent.succeeded" => {
                let Some(intent) = StripeClient::extract_payment_intent(&event) else {
                    warn!(event_type = %event.type_, "payments: webhook without payment intent object");
                    return Ok(());
                };
                let Some(booking_id) = intent.booking_id() else {
                    warn!(payment_intent_id = %intent.id, "payments: succeeded intent has no booking_id metadata");
                    return Ok(());
                };
                self.confirmation
                    .confirm_payment(booking_id, Some(intent.id))
                    .await
                    .map(|_| ())
            }
            "payment_intent.payment_failed" => {
                let Some(booking_id) =
                    StripeClient::extract_payment_intent(&event).and_then(|intent| intent.booking_id())
                else {
                    warn!("payments: failed intent has no booking_id metadata");
                    return Ok(());
                };
                self.confirmation.fail_payment(booking_id).await.map(|_| ())
            }
            "checkout.session.completed" => {
                let Some(session) = StripeClient::extract_checkout_session(&event) else {
                    warn!("payments: webhook without checkout session object");
                    return Ok(());
                };
                let Some(booking_id) = session.booking_id() else {
                    warn!(session_id = ?session.id, "payments: checkout session has no booking_id metadata");
                    return Ok(());
                };
                if session.payment_status.as_deref().is_some_and(|status| status != "paid") {
                    info!(%booking_id, payment_status = ?session.payment_status, "payments: checkout completed but not yet paid");
                    return Ok(());
                }
                self.confirmation
                    .confirm_payment(booking_id, session.payment_intent)
                    .await
                    .map(|_| ())
            }
            other => {
                debug!(event_type = %other, "payments: unhandled stripe event type");
                Ok(())
            }
        };

        // Only store failures are worth a redelivery; anything else would fail
        // the same way again.
        match result {
            Err(BookingError::Internal(err)) => Err(BookingError::Internal(err)),
            Err(err) => {
                warn!(event_type = %event.type_, error = %err, "payments: webhook acknowledged without effect");
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    /// Browser return from the payment page. Always yields a frontend URL; the
    /// query string tells the page whether the booking was confirmed.
    pub async fn handle_success_redirect(&self, query: PaymentSuccessQuery) -> String {
        let booking_id = query.booking_id;
        let pending_url = format!(
            "{}/booking/confirmation?bookingId={}&status=pending",
            self.frontend_base_url, booking_id
        );

        let payment_intent_id = match query.payment_intent.filter(|id| !id.trim().is_empty()) {
            Some(id) => Some(id),
            None => match self.booking_repo.find_by_id(booking_id).await {
                Ok(booking) => booking.and_then(|booking| booking.payment_intent_id),
                Err(err) => {
                    error!(%booking_id, db_error = ?err, "payments: failed to load booking on redirect");
                    None
                }
            },
        };

        let Some(payment_intent_id) = payment_intent_id else {
            warn!(%booking_id, "payments: success redirect without payment intent");
            return pending_url;
        };

        let intent = match self.gateway.retrieve_payment_intent(&payment_intent_id).await {
            Ok(intent) => intent,
            Err(err) => {
                error!(%booking_id, %payment_intent_id, error = ?err, "payments: failed to retrieve intent on redirect");
                return pending_url;
            }
        };

        if !intent.is_succeeded() || intent.booking_id().is_some_and(|tagged| tagged != booking_id) {
            warn!(%booking_id, %payment_intent_id, intent_status = %intent.status, "payments: redirect intent not confirmable");
            return pending_url;
        }

        match self
            .confirmation
            .confirm_payment(booking_id, Some(intent.id))
            .await
        {
            Ok(outcome) => format!(
                "{}/booking/confirmation?bookingId={}&status=confirmed&wedding={}",
                self.frontend_base_url, booking_id, outcome.is_wedding
            ),
            Err(err) => {
                error!(%booking_id, error = %err, "payments: confirmation on redirect failed");
                pending_url
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use crates::{
        domain::{
            repositories::bookings::MockBookingRepository,
            value_objects::bookings::ConfirmationOutcome,
        },
        payments::stripe_client::StripeEventData,
    };
    use mockall::predicate::eq;
    use std::collections::HashMap;

    use crate::usecases::bookings::MockBookingConfirmation;

    type TestPayments =
        PaymentUseCase<MockBookingRepository, MockBookingConfirmation, MockPaymentGateway>;

    fn usecase(
        bookings: MockBookingRepository,
        confirmation: MockBookingConfirmation,
        gateway: MockPaymentGateway,
    ) -> TestPayments {
        PaymentUseCase::new(
            Arc::new(bookings),
            Arc::new(confirmation),
            Arc::new(gateway),
            "https://book.example.com/".to_string(),
        )
    }

    fn owner(user_id: Uuid) -> BookingOwner {
        BookingOwner {
            user_id,
            email: None,
            is_admin: false,
        }
    }

    fn booking(id: Uuid, user_id: Uuid, status: &str, payment_status: &str) -> BookingEntity {
        let now = Utc::now();
        BookingEntity {
            id,
            user_id,
            customer_email: Some("client@example.com".to_string()),
            service_type: "dj".to_string(),
            service_provider: "dj_cease".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            event_start_time: "18:00".to_string(),
            event_end_time: "23:00".to_string(),
            total_price: 60_000,
            payment_status: payment_status.to_string(),
            status: status.to_string(),
            payment_intent_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn intent(id: &str, status: &str, booking_id: Option<Uuid>) -> StripePaymentIntent {
        StripePaymentIntent {
            id: id.to_string(),
            status: status.to_string(),
            amount: Some(60_000),
            client_secret: Some(format!("{}_secret", id)),
            metadata: booking_id
                .map(|id| HashMap::from([("booking_id".to_string(), id.to_string())]))
                .unwrap_or_default(),
        }
    }

    fn outcome(booking_id: Uuid, is_wedding: bool) -> ConfirmationOutcome {
        ConfirmationOutcome {
            booking_id,
            is_wedding,
            transitioned: true,
            slot_created: true,
            invoice_number: Some("INV-2025-0001".to_string()),
        }
    }

    fn event(type_: &str, object: serde_json::Value) -> StripeEvent {
        StripeEvent {
            id: Some("evt_1".to_string()),
            type_: type_.to_string(),
            created: None,
            livemode: Some(false),
            data: StripeEventData { object },
        }
    }

    #[tokio::test]
    async fn create_intent_attaches_intent_to_booking() {
        let user_id = Uuid::new_v4();
        let booking_id = Uuid::new_v4();

        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_id().returning(move |id| {
            let found = booking(id, user_id, "pending", "pending");
            Box::pin(async move { Ok(Some(found)) })
        });
        bookings
            .expect_attach_payment_intent()
            .withf(move |id, intent_id| *id == booking_id && intent_id.to_string() == "pi_1")
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .with(eq(60_000i64), eq(booking_id), mockall::predicate::always())
            .returning(move |_, id, _| {
                let created = intent("pi_1", "requires_payment_method", Some(id));
                Box::pin(async move { Ok(created) })
            });

        let response = usecase(bookings, MockBookingConfirmation::new(), gateway)
            .create_intent(&owner(user_id), booking_id)
            .await
            .unwrap();

        assert_eq!(response.payment_intent_id, "pi_1");
        assert_eq!(response.client_secret, "pi_1_secret");
        assert_eq!(response.amount, 60_000);
    }

    #[tokio::test]
    async fn gateway_outage_on_create_intent_is_bad_gateway() {
        let user_id = Uuid::new_v4();
        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_id().returning(move |id| {
            let found = booking(id, user_id, "pending", "pending");
            Box::pin(async move { Ok(Some(found)) })
        });
        bookings.expect_attach_payment_intent().never();

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .returning(|_, _, _| Box::pin(async { Err(anyhow::anyhow!("stripe 500")) }));

        let err = usecase(bookings, MockBookingConfirmation::new(), gateway)
            .create_intent(&owner(user_id), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Gateway(_)));
    }

    #[tokio::test]
    async fn direct_confirm_requires_a_succeeded_intent() {
        let user_id = Uuid::new_v4();
        let booking_id = Uuid::new_v4();

        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_id().returning(move |id| {
            let found = booking(id, user_id, "pending", "pending");
            Box::pin(async move { Ok(Some(found)) })
        });

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_retrieve_payment_intent().returning(move |id| {
            let found = intent(id, "processing", Some(booking_id));
            Box::pin(async move { Ok(found) })
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation.expect_confirm_payment().never();

        let err = usecase(bookings, confirmation, gateway)
            .confirm_direct(
                &owner(user_id),
                ConfirmPaymentRequest {
                    booking_id,
                    payment_intent_id: "pi_1".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn direct_confirm_reports_wedding_flag() {
        let user_id = Uuid::new_v4();
        let booking_id = Uuid::new_v4();

        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_id().returning(move |id| {
            let found = booking(id, user_id, "pending", "pending");
            Box::pin(async move { Ok(Some(found)) })
        });

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_retrieve_payment_intent().returning(move |id| {
            let found = intent(id, "succeeded", Some(booking_id));
            Box::pin(async move { Ok(found) })
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation
            .expect_confirm_payment()
            .with(eq(booking_id), eq(Some("pi_1".to_string())))
            .times(1)
            .returning(|id, _| Box::pin(async move { Ok(outcome(id, true)) }));

        let response = usecase(bookings, confirmation, gateway)
            .confirm_direct(
                &owner(user_id),
                ConfirmPaymentRequest {
                    booking_id,
                    payment_intent_id: "pi_1".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(response.success);
        assert!(response.is_wedding);
        assert_eq!(response.booking_id, booking_id);
    }

    #[tokio::test]
    async fn webhook_with_bad_signature_is_rejected() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_verify_webhook_signature()
            .returning(|_, _| Err(anyhow::anyhow!("invalid webhook signature")));

        let mut confirmation = MockBookingConfirmation::new();
        confirmation.expect_confirm_payment().never();

        let err = usecase(MockBookingRepository::new(), confirmation, gateway)
            .handle_webhook(b"{}", "t=1,v1=00")
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn succeeded_webhook_confirms_the_tagged_booking() {
        let booking_id = Uuid::new_v4();

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_webhook_signature().returning(move |_, _| {
            Ok(event(
                "payment_intent.succeeded",
                serde_json::json!({
                    "id": "pi_9",
                    "status": "succeeded",
                    "metadata": { "booking_id": booking_id.to_string() }
                }),
            ))
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation
            .expect_confirm_payment()
            .with(eq(booking_id), eq(Some("pi_9".to_string())))
            .times(1)
            .returning(|id, _| Box::pin(async move { Ok(outcome(id, false)) }));

        usecase(MockBookingRepository::new(), confirmation, gateway)
            .handle_webhook(b"{}", "sig")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_webhook_marks_payment_failed() {
        let booking_id = Uuid::new_v4();

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_webhook_signature().returning(move |_, _| {
            Ok(event(
                "payment_intent.payment_failed",
                serde_json::json!({
                    "id": "pi_9",
                    "status": "requires_payment_method",
                    "metadata": { "booking_id": booking_id.to_string() }
                }),
            ))
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation
            .expect_fail_payment()
            .with(eq(booking_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(true) }));

        usecase(MockBookingRepository::new(), confirmation, gateway)
            .handle_webhook(b"{}", "sig")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn checkout_completed_webhook_confirms_with_session_intent() {
        let booking_id = Uuid::new_v4();

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_webhook_signature().returning(move |_, _| {
            Ok(event(
                "checkout.session.completed",
                serde_json::json!({
                    "id": "cs_1",
                    "payment_intent": "pi_7",
                    "payment_status": "paid",
                    "metadata": { "booking_id": booking_id.to_string() }
                }),
            ))
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation
            .expect_confirm_payment()
            .with(eq(booking_id), eq(Some("pi_7".to_string())))
            .times(1)
            .returning(|id, _| Box::pin(async move { Ok(outcome(id, false)) }));

        usecase(MockBookingRepository::new(), confirmation, gateway)
            .handle_webhook(b"{}", "sig")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn webhook_store_failure_asks_for_redelivery() {
        let booking_id = Uuid::new_v4();

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_webhook_signature().returning(move |_, _| {
            Ok(event(
                "payment_intent.succeeded",
                serde_json::json!({
                    "id": "pi_9",
                    "status": "succeeded",
                    "metadata": { "booking_id": booking_id.to_string() }
                }),
            ))
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation
            .expect_confirm_payment()
            .returning(|_, _| Box::pin(async { Err(BookingError::Internal(anyhow::anyhow!("pool timeout"))) }));

        let err = usecase(MockBookingRepository::new(), confirmation, gateway)
            .handle_webhook(b"{}", "sig")
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Internal(_)));
    }

    #[tokio::test]
    async fn webhook_for_unavailable_slot_is_acknowledged() {
        let booking_id = Uuid::new_v4();

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify_webhook_signature().returning(move |_, _| {
            Ok(event(
                "payment_intent.succeeded",
                serde_json::json!({
                    "id": "pi_9",
                    "status": "succeeded",
                    "metadata": { "booking_id": booking_id.to_string() }
                }),
            ))
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation.expect_confirm_payment().returning(|_, _| {
            Box::pin(async { Err(BookingError::SlotUnavailable("Date manually blocked".to_string())) })
        });

        usecase(MockBookingRepository::new(), confirmation, gateway)
            .handle_webhook(b"{}", "sig")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn success_redirect_confirms_and_points_to_frontend() {
        let booking_id = Uuid::new_v4();

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_retrieve_payment_intent().returning(move |id| {
            let found = intent(id, "succeeded", Some(booking_id));
            Box::pin(async move { Ok(found) })
        });

        let mut confirmation = MockBookingConfirmation::new();
        confirmation
            .expect_confirm_payment()
            .times(1)
            .returning(|id, _| Box::pin(async move { Ok(outcome(id, true)) }));

        let url = usecase(MockBookingRepository::new(), confirmation, gateway)
            .handle_success_redirect(PaymentSuccessQuery {
                booking_id,
                payment_intent: Some("pi_3".to_string()),
            })
            .await;

        assert_eq!(
            url,
            format!(
                "https://book.example.com/booking/confirmation?bookingId={}&status=confirmed&wedding=true",
                booking_id
            )
        );
    }

    #[tokio::test]
    async fn success_redirect_without_any_intent_stays_pending() {
        let booking_id = Uuid::new_v4();

        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_id().returning(|id| {
            let found = booking(id, Uuid::new_v4(), "pending", "pending");
            Box::pin(async move { Ok(Some(found)) })
        });

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_retrieve_payment_intent().never();

        let url = usecase(bookings, MockBookingConfirmation::new(), gateway)
            .handle_success_redirect(PaymentSuccessQuery {
                booking_id,
                payment_intent: None,
            })
            .await;

        assert!(url.ends_with("status=pending"));
    }
}
