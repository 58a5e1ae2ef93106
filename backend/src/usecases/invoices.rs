use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use crates::{
    domain::{
        entities::invoices::{InsertInvoiceEntity, InvoiceEntity},
        repositories::{bookings::BookingRepository, invoices::InvoiceRepository},
        value_objects::{
            enums::{invoice_statuses::InvoiceStatus, payment_statuses::PaymentStatus},
            invoices::{
                AutoGenerateInvoicesResponse, InvoiceAmounts, InvoiceDto, ListInvoicesQuery,
                PAYMENT_TERMS_DAYS, REMINDER_INTERVAL_DAYS, UpdateInvoiceStatusRequest,
                invoice_number_prefix, next_invoice_number,
            },
        },
    },
    notifications::{Delivery, InvoiceNotice, NotificationGateway},
};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::error::{BookingError, UseCaseResult};

fn parse_invoice_status(raw: &str) -> UseCaseResult<InvoiceStatus> {
    InvoiceStatus::from_str(raw.trim()).ok_or_else(|| {
        BookingError::Validation(format!("unknown invoice status: {}", raw.trim()))
    })
}

pub struct InvoiceUseCase<I, B, N>
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    invoice_repo: Arc<I>,
    booking_repo: Arc<B>,
    notifier: Arc<N>,
}

impl<I, B, N> InvoiceUseCase<I, B, N>
where
    I: InvoiceRepository + Send + Sync + 'static,
    B: BookingRepository + Send + Sync + 'static,
    N: NotificationGateway + Send + Sync + 'static,
{
    pub fn new(invoice_repo: Arc<I>, booking_repo: Arc<B>, notifier: Arc<N>) -> Self {
        Self {
            invoice_repo,
            booking_repo,
            notifier,
        }
    }

    /// Issues the booking's invoice unless one already exists. The flag is true
    /// only when this call inserted it.
    pub async fn generate_for_booking(
        &self,
        booking_id: Uuid,
        total: i32,
        payment_status: PaymentStatus,
    ) -> UseCaseResult<(InvoiceEntity, bool)> {
        if let Some(existing) = self
            .invoice_repo
            .find_by_booking_id(booking_id)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "invoices: failed to look up existing invoice");
                BookingError::Internal(err)
            })?
        {
            if payment_status == PaymentStatus::Paid && existing.amount_due != 0 {
                return self.reconcile_paid(existing).await.map(|invoice| (invoice, false));
            }
            info!(
                %booking_id,
                invoice_number = %existing.invoice_number,
                "invoices: invoice already exists for booking"
            );
            return Ok((existing, false));
        }

        let issue_date = Utc::now().date_naive();
        let year = issue_date.year();

        let highest = self
            .invoice_repo
            .find_highest_number_with_prefix(&invoice_number_prefix(year))
            .await
            .map_err(|err| {
                error!(%booking_id, year, db_error = ?err, "invoices: failed to read invoice sequence");
                BookingError::Internal(err)
            })?;
        let invoice_number = next_invoice_number(year, highest.as_deref());

        let amounts = InvoiceAmounts::for_payment(total, payment_status);
        let invoice = self
            .invoice_repo
            .create_invoice(InsertInvoiceEntity {
                booking_id,
                invoice_number: invoice_number.clone(),
                total: amounts.total,
                amount_paid: amounts.amount_paid,
                amount_due: amounts.amount_due(),
                status: amounts.initial_status().to_string(),
                issue_date,
                due_date: issue_date + Duration::days(PAYMENT_TERMS_DAYS),
            })
            .await
            .map_err(|err| {
                error!(
                    %booking_id,
                    invoice_number = %invoice_number,
                    db_error = ?err,
                    "invoices: failed to insert invoice"
                );
                BookingError::Internal(err)
            })?;

        info!(
            %booking_id,
            invoice_number = %invoice.invoice_number,
            amount_due = invoice.amount_due,
            status = %invoice.status,
            "invoices: invoice generated"
        );

        Ok((invoice, true))
    }

    /// Brings an invoice issued before payment in line with a paid booking.
    async fn reconcile_paid(&self, existing: InvoiceEntity) -> UseCaseResult<InvoiceEntity> {
        let amounts = InvoiceAmounts {
            total: existing.total,
            amount_paid: existing.amount_paid,
        }
        .with_status(InvoiceStatus::Paid);

        let updated = self
            .invoice_repo
            .update_status(
                existing.id,
                InvoiceStatus::Paid.as_str(),
                amounts.amount_paid,
                amounts.amount_due(),
            )
            .await
            .map_err(|err| {
                error!(
                    booking_id = %existing.booking_id,
                    invoice_number = %existing.invoice_number,
                    db_error = ?err,
                    "invoices: failed to mark existing invoice paid"
                );
                BookingError::Internal(err)
            })?;

        info!(
            booking_id = %existing.booking_id,
            invoice_number = %updated.invoice_number,
            from = %existing.status,
            "invoices: existing invoice reconciled with payment"
        );

        Ok(updated)
    }

    pub async fn create_for_booking(&self, booking_id: Uuid) -> UseCaseResult<InvoiceDto> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await
            .map_err(BookingError::Internal)?
            .ok_or_else(|| {
                warn!(%booking_id, "invoices: booking not found for invoice");
                BookingError::NotFound("booking")
            })?;

        let payment_status =
            PaymentStatus::from_str(&booking.payment_status).unwrap_or(PaymentStatus::Pending);

        let (invoice, _) = self
            .generate_for_booking(booking.id, booking.total_price, payment_status)
            .await?;

        Ok(InvoiceDto::from(invoice))
    }

    pub async fn list(&self, query: ListInvoicesQuery) -> UseCaseResult<Vec<InvoiceDto>> {
        let status = query
            .status
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_invoice_status)
            .transpose()?;

        let invoices = self
            .invoice_repo
            .list_invoices(status.map(|status| status.to_string()))
            .await
            .map_err(|err| {
                error!(status = ?status, db_error = ?err, "invoices: failed to list invoices");
                BookingError::Internal(err)
            })?;

        Ok(invoices.into_iter().map(InvoiceDto::from).collect())
    }

    pub async fn get(&self, invoice_id: Uuid) -> UseCaseResult<InvoiceDto> {
        self.load(invoice_id).await.map(InvoiceDto::from)
    }

    async fn load(&self, invoice_id: Uuid) -> UseCaseResult<InvoiceEntity> {
        self.invoice_repo
            .find_by_id(invoice_id)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: failed to load invoice");
                BookingError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%invoice_id, "invoices: invoice not found");
                BookingError::NotFound("invoice")
            })
    }

    pub async fn set_status(
        &self,
        invoice_id: Uuid,
        request: UpdateInvoiceStatusRequest,
    ) -> UseCaseResult<InvoiceDto> {
        let status = parse_invoice_status(&request.status)?;
        let invoice = self.load(invoice_id).await?;

        let amounts = InvoiceAmounts {
            total: invoice.total,
            amount_paid: invoice.amount_paid,
        }
        .with_status(status);

        let updated = self
            .invoice_repo
            .update_status(
                invoice_id,
                status.as_str(),
                amounts.amount_paid,
                amounts.amount_due(),
            )
            .await
            .map_err(|err| {
                error!(%invoice_id, status = %status, db_error = ?err, "invoices: failed to update status");
                BookingError::Internal(err)
            })?;

        info!(
            %invoice_id,
            from = %invoice.status,
            to = %updated.status,
            amount_due = updated.amount_due,
            "invoices: status updated"
        );

        Ok(InvoiceDto::from(updated))
    }

    /// Sends a payment reminder and schedules the next one. Paid invoices are
    /// refused. Nothing is recorded unless the email actually went out.
    pub async fn send_reminder(&self, invoice_id: Uuid) -> UseCaseResult<InvoiceDto> {
        let invoice = self.load(invoice_id).await?;

        if InvoiceStatus::from_str(&invoice.status) == Some(InvoiceStatus::Paid) {
            warn!(%invoice_id, "invoices: reminder refused for paid invoice");
            return Err(BookingError::Validation(
                "Invoice is already paid".to_string(),
            ));
        }

        let booking = self
            .booking_repo
            .find_by_id(invoice.booking_id)
            .await
            .map_err(BookingError::Internal)?
            .ok_or(BookingError::NotFound("booking"))?;

        let notice = InvoiceNotice {
            invoice_number: invoice.invoice_number.clone(),
            booking_id: booking.id,
            customer_email: booking.customer_email.clone(),
            amount_due: invoice.amount_due,
            due_date: invoice.due_date,
        };

        let delivery = self
            .notifier
            .send_invoice_reminder(&notice)
            .await
            .map_err(|err| {
                error!(
                    %invoice_id,
                    invoice_number = %invoice.invoice_number,
                    error = ?err,
                    "invoices: reminder delivery failed"
                );
                BookingError::Gateway(err)
            })?;
        if delivery == Delivery::Skipped {
            warn!(
                %invoice_id,
                invoice_number = %invoice.invoice_number,
                "invoices: reminder not delivered, no email channel or recipient"
            );
            return Err(BookingError::Validation(
                "Reminder could not be delivered: no email channel or customer email".to_string(),
            ));
        }

        let next_reminder_date: NaiveDate =
            Utc::now().date_naive() + Duration::days(REMINDER_INTERVAL_DAYS);
        let updated = self
            .invoice_repo
            .record_reminder(invoice_id, next_reminder_date)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: failed to record reminder");
                BookingError::Internal(err)
            })?;

        info!(
            %invoice_id,
            reminder_count = updated.reminder_count,
            %next_reminder_date,
            "invoices: reminder sent"
        );

        Ok(InvoiceDto::from(updated))
    }

    /// Back-fills invoices for paid bookings that never got one. A failure on
    /// one booking is logged and does not stop the rest.
    pub async fn auto_generate_missing(&self) -> UseCaseResult<AutoGenerateInvoicesResponse> {
        let bookings = self
            .booking_repo
            .list_paid_without_invoice()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "invoices: failed to list paid bookings without invoice");
                BookingError::Internal(err)
            })?;

        info!(candidates = bookings.len(), "invoices: auto-generating missing invoices");

        let mut invoice_numbers = Vec::new();
        for booking in bookings {
            match self
                .generate_for_booking(booking.id, booking.total_price, PaymentStatus::Paid)
                .await
            {
                Ok((invoice, true)) => invoice_numbers.push(invoice.invoice_number),
                Ok((_, false)) => {}
                Err(err) => {
                    error!(booking_id = %booking.id, error = %err, "invoices: auto-generation failed for booking");
                }
            }
        }

        Ok(AutoGenerateInvoicesResponse {
            generated: invoice_numbers.len(),
            invoice_numbers,
        })
    }
}
