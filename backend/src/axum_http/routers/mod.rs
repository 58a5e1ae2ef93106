pub mod availability;
pub mod bookings;
pub mod invoices;
pub mod payments;
