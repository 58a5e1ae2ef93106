pub mod availability;
pub mod bookings;
pub mod error;
pub mod invoices;
pub mod payments;
