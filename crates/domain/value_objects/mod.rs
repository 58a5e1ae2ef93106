pub mod availability;
pub mod bookings;
pub mod enums;
pub mod invoices;
pub mod pricing;
pub mod time_of_day;
