pub mod booking_statuses;
pub mod invoice_statuses;
pub mod payment_statuses;
pub mod service_families;
pub mod time_slot_statuses;
