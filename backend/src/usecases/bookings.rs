use std::sync::Arc;

use async_trait::async_trait;
use crates::{
    domain::{
        entities::{
            bookings::{BookingEntity, InsertBookingEntity},
            time_slots::InsertTimeSlotEntity,
        },
        repositories::{
            availability_blocks::AvailabilityBlockRepository, bookings::BookingRepository,
            invoices::InvoiceRepository, time_slots::TimeSlotRepository,
            wedding_forms::WeddingFormRepository,
        },
        value_objects::{
            availability::CandidateWindow,
            bookings::{BookingDto, ConfirmationOutcome, CreateBookingRequest, CreateBookingResponse},
            enums::{
                booking_statuses::{BookingLifecycle, BookingStatus},
                payment_statuses::PaymentStatus,
                service_families::ServiceFamily,
                time_slot_statuses::TimeSlotStatus,
            },
            pricing::{ServiceCatalog, is_wedding_event},
            time_of_day::{format_minutes, hours_between, parse_time},
        },
    },
    notifications::{BookingNotice, NotificationGateway},
};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    availability::{AvailabilityUseCase, normalize_provider, parse_time_field},
    error::{BookingError, UseCaseResult},
    invoices::InvoiceUseCase,
};

pub const NEXT_STEP_PAYMENT: &str = "payment";

/// Longest event window a single booking may cover.
pub const MAX_EVENT_MINUTES: i32 = 24 * 60;

/// The single confirm/fail entry into the booking lifecycle. Every payment
/// path (direct confirm, webhook, success redirect) goes through this.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait BookingConfirmation: Send + Sync {
    async fn confirm_payment(
        &self,
        booking_id: Uuid,
        payment_intent_id: Option<String>,
    ) -> UseCaseResult<ConfirmationOutcome>;

    /// Returns true only if this call moved the booking to failed.
    async fn fail_payment(&self, booking_id: Uuid) -> UseCaseResult<bool>;
}

/// The caller's identity as far as booking ownership is concerned.
#[derive(Debug, Clone)]
pub struct BookingOwner {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub is_admin: bool,
}

struct ValidatedBooking {
    catalog: ServiceCatalog,
    provider: String,
    start: i32,
    end: i32,
}

pub struct BookingUseCase<A, S, B, I, W, N>
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    W: WeddingFormRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    availability: Arc<AvailabilityUseCase<A, S, B>>,
    invoices: Arc<InvoiceUseCase<I, B, N>>,
    booking_repo: Arc<B>,
    slot_repo: Arc<S>,
    wedding_form_repo: Arc<W>,
    notifier: Arc<N>,
}

impl<A, S, B, I, W, N> BookingUseCase<A, S, B, I, W, N>
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    W: WeddingFormRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    pub fn new(
        availability: Arc<AvailabilityUseCase<A, S, B>>,
        invoices: Arc<InvoiceUseCase<I, B, N>>,
        booking_repo: Arc<B>,
        slot_repo: Arc<S>,
        wedding_form_repo: Arc<W>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            availability,
            invoices,
            booking_repo,
            slot_repo,
            wedding_form_repo,
            notifier,
        }
    }

    fn validate(request: &CreateBookingRequest) -> UseCaseResult<ValidatedBooking> {
        let provider = normalize_provider(&request.service_provider)?;

        // Pricing keys off the provider when it is in the catalog, otherwise the
        // generic service type.
        let catalog = ServiceCatalog::from_key(&provider)
            .or_else(|| ServiceCatalog::from_key(&request.service_type))
            .ok_or_else(|| BookingError::InvalidService(provider.clone()))?;

        if ServiceFamily::of_provider(&provider) != catalog.family() {
            return Err(BookingError::Validation(format!(
                "service type {} does not match provider {}",
                request.service_type.trim(),
                provider
            )));
        }

        if request.event_details.event_type.trim().is_empty() {
            return Err(BookingError::Validation(
                "eventDetails.eventType is required".to_string(),
            ));
        }

        let start = parse_time_field("startTime", &request.start_time)?;
        let end = parse_time_field("endTime", &request.end_time)?;
        if end <= start {
            return Err(BookingError::Validation(
                "endTime must be after startTime".to_string(),
            ));
        }
        if i64::from(end) - i64::from(start) > i64::from(MAX_EVENT_MINUTES) {
            return Err(BookingError::Validation(
                "event cannot be longer than 24 hours".to_string(),
            ));
        }

        Ok(ValidatedBooking {
            catalog,
            provider,
            start,
            end,
        })
    }

    /// Re-validates the exact window, prices the booking and stores it as
    /// pending. No time slot is written until payment is confirmed.
    pub async fn create_booking(
        &self,
        owner: &BookingOwner,
        request: CreateBookingRequest,
    ) -> UseCaseResult<CreateBookingResponse> {
        let validated = Self::validate(&request).inspect_err(|err| {
            warn!(
                user_id = %owner.user_id,
                status = err.status_code().as_u16(),
                error = %err,
                "bookings: create request rejected"
            );
        })?;

        let availability = self
            .availability
            .evaluate(
                &validated.provider,
                request.event_date,
                CandidateWindow {
                    start: validated.start,
                    end: validated.end,
                },
            )
            .await?;

        if !availability.available {
            let reason = availability
                .reason
                .unwrap_or_else(|| "Selected time is no longer available".to_string());
            warn!(
                user_id = %owner.user_id,
                provider = %validated.provider,
                event_date = %request.event_date,
                reason = %reason,
                "bookings: slot unavailable at checkout"
            );
            return Err(BookingError::SlotUnavailable(reason));
        }

        let family = validated.catalog.family();
        let is_wedding =
            family == ServiceFamily::Dj && is_wedding_event(&request.event_details.event_type);
        let tier = validated.catalog.pricing(is_wedding);
        let total_price = tier
            .total_for(hours_between(validated.start, validated.end))
            .ok_or_else(|| BookingError::Validation("event is too long to price".to_string()))?;

        let booking = InsertBookingEntity {
            user_id: owner.user_id,
            customer_email: owner.email.clone(),
            service_type: family.to_string(),
            service_provider: validated.provider.clone(),
            event_date: request.event_date,
            event_start_time: format_minutes(validated.start),
            event_end_time: format_minutes(validated.end),
            total_price,
            payment_status: PaymentStatus::Pending.to_string(),
            status: BookingStatus::Pending.to_string(),
        };

        let booking_id = self
            .booking_repo
            .create_booking_with_details(booking, request.event_details.into_entity(Uuid::nil()))
            .await
            .map_err(|err| {
                error!(
                    user_id = %owner.user_id,
                    provider = %validated.provider,
                    db_error = ?err,
                    "bookings: failed to insert booking"
                );
                BookingError::Internal(err)
            })?;

        info!(
            user_id = %owner.user_id,
            %booking_id,
            provider = %validated.provider,
            event_date = %request.event_date,
            total_price,
            is_wedding,
            "bookings: pending booking created"
        );

        Ok(CreateBookingResponse {
            booking_id,
            total_price,
            next_step: NEXT_STEP_PAYMENT.to_string(),
        })
    }

    /// Bookings are visible to their owner and to admins. Anyone else gets the
    /// same answer as for a missing id.
    pub async fn get_booking(&self, owner: &BookingOwner, booking_id: Uuid) -> UseCaseResult<BookingDto> {
        let booking = self.load(booking_id).await?;

        if booking.user_id != owner.user_id && !owner.is_admin {
            warn!(user_id = %owner.user_id, %booking_id, "bookings: booking requested by non-owner");
            return Err(BookingError::NotFound("booking"));
        }

        let details = self
            .booking_repo
            .find_event_details(booking_id)
            .await
            .map_err(BookingError::Internal)?;

        Ok(BookingDto::from_entities(booking, details))
    }

    async fn load(&self, booking_id: Uuid) -> UseCaseResult<BookingEntity> {
        self.booking_repo
            .find_by_id(booking_id)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "bookings: failed to load booking");
                BookingError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%booking_id, "bookings: booking not found");
                BookingError::NotFound("booking")
            })
    }

    async fn revalidate_window(&self, booking: &BookingEntity) -> UseCaseResult<()> {
        let window = match (
            parse_time(&booking.event_start_time),
            parse_time(&booking.event_end_time),
        ) {
            (Some(start), Some(end)) => CandidateWindow { start, end },
            _ => {
                return Err(BookingError::Internal(anyhow::anyhow!(
                    "booking {} has malformed stored times",
                    booking.id
                )));
            }
        };

        let availability = self
            .availability
            .evaluate(&booking.service_provider, booking.event_date, window)
            .await?;

        if availability.available {
            return Ok(());
        }

        let reason = availability
            .reason
            .unwrap_or_else(|| "Selected time is no longer available".to_string());
        warn!(
            booking_id = %booking.id,
            reason = %reason,
            "bookings: failed booking can no longer be confirmed"
        );
        Err(BookingError::SlotUnavailable(reason))
    }

    async fn notify_confirmed(&self, booking: &BookingEntity, event_type: &str, is_wedding: bool) {
        let notice = BookingNotice {
            booking_id: booking.id,
            customer_email: booking.customer_email.clone(),
            service_provider: booking.service_provider.clone(),
            event_type: event_type.to_string(),
            event_date: booking.event_date,
            start_time: booking.event_start_time.clone(),
            end_time: booking.event_end_time.clone(),
            total_price: booking.total_price,
            is_wedding,
        };

        if let Err(err) = self.notifier.send_booking_confirmation(&notice).await {
            error!(booking_id = %booking.id, error = ?err, "bookings: confirmation email failed");
        }

        if is_wedding {
            match self
                .wedding_form_repo
                .create_if_absent(booking.id, booking.user_id)
                .await
            {
                Ok(created) => info!(booking_id = %booking.id, created, "bookings: wedding form seeded"),
                Err(err) => {
                    error!(booking_id = %booking.id, db_error = ?err, "bookings: failed to seed wedding form")
                }
            }

            if let Err(err) = self.notifier.send_wedding_form_request(&notice).await {
                error!(booking_id = %booking.id, error = ?err, "bookings: wedding form email failed");
            }
        }

        if let Err(err) = self.notifier.send_admin_booking_alert(&notice).await {
            error!(booking_id = %booking.id, error = ?err, "bookings: admin alert failed");
        }
    }
}

#[async_trait]
impl<A, S, B, I, W, N> BookingConfirmation for BookingUseCase<A, S, B, I, W, N>
where
    A: AvailabilityBlockRepository + Send + Sync + 'static,
    S: TimeSlotRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    W: WeddingFormRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    async fn confirm_payment(
        &self,
        booking_id: Uuid,
        payment_intent_id: Option<String>,
    ) -> UseCaseResult<ConfirmationOutcome> {
        let booking = self.load(booking_id).await?;
        let lifecycle = BookingLifecycle::from_columns(&booking.status, &booking.payment_status);

        info!(
            %booking_id,
            lifecycle = ?lifecycle,
            payment_intent_id = ?payment_intent_id,
            "bookings: confirming payment"
        );

        match lifecycle {
            BookingLifecycle::Cancelled => {
                warn!(%booking_id, "bookings: confirm refused for cancelled booking");
                return Err(BookingError::Validation(
                    "Booking has been cancelled".to_string(),
                ));
            }
            BookingLifecycle::Failed => self.revalidate_window(&booking).await?,
            BookingLifecycle::Pending | BookingLifecycle::Paid => {}
        }

        let transitioned = self
            .booking_repo
            .mark_paid(booking_id, payment_intent_id)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "bookings: failed to mark booking paid");
                BookingError::Internal(err)
            })?;

        let slot_created = match ServiceFamily::of_provider(&booking.service_provider) {
            ServiceFamily::Photobooth => false,
            ServiceFamily::Dj => self
                .slot_repo
                .create_slot_if_absent(InsertTimeSlotEntity {
                    booking_id,
                    service_provider: booking.service_provider.clone(),
                    event_date: booking.event_date,
                    start_time: booking.event_start_time.clone(),
                    end_time: booking.event_end_time.clone(),
                    status: TimeSlotStatus::Confirmed.to_string(),
                })
                .await
                .map_err(|err| {
                    error!(%booking_id, db_error = ?err, "bookings: failed to create time slot");
                    BookingError::Internal(err)
                })?,
        };

        let invoice_number = match self
            .invoices
            .generate_for_booking(booking_id, booking.total_price, PaymentStatus::Paid)
            .await
        {
            Ok((invoice, _)) => Some(invoice.invoice_number),
            Err(err) => {
                error!(%booking_id, error = %err, "bookings: invoice generation failed after payment");
                None
            }
        };

        let event_type = match self.booking_repo.find_event_details(booking_id).await {
            Ok(details) => details.map(|details| details.event_type).unwrap_or_default(),
            Err(err) => {
                error!(%booking_id, db_error = ?err, "bookings: failed to load event details");
                String::new()
            }
        };
        let is_wedding = is_wedding_event(&event_type);

        if transitioned {
            self.notify_confirmed(&booking, &event_type, is_wedding).await;
        }

        info!(
            %booking_id,
            transitioned,
            slot_created,
            invoice_number = ?invoice_number,
            is_wedding,
            "bookings: payment confirmed"
        );

        Ok(ConfirmationOutcome {
            booking_id,
            is_wedding,
            transitioned,
            slot_created,
            invoice_number,
        })
    }

    async fn fail_payment(&self, booking_id: Uuid) -> UseCaseResult<bool> {
        let booking = self.load(booking_id).await?;

        let transitioned = match BookingLifecycle::from_columns(&booking.status, &booking.payment_status) {
            BookingLifecycle::Paid => {
                warn!(%booking_id, "bookings: payment failure ignored for paid booking");
                return Ok(false);
            }
            BookingLifecycle::Failed | BookingLifecycle::Cancelled => false,
            BookingLifecycle::Pending => self
                .booking_repo
                .mark_payment_failed(booking_id)
                .await
                .map_err(|err| {
                    error!(%booking_id, db_error = ?err, "bookings: failed to mark payment failed");
                    BookingError::Internal(err)
                })?,
        };

        let released = self
            .slot_repo
            .cancel_slots_for_booking(booking_id)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "bookings: failed to release time slot");
                BookingError::Internal(err)
            })?;

        info!(%booking_id, transitioned, released, "bookings: payment failure recorded");
        Ok(transitioned)
    }
}
