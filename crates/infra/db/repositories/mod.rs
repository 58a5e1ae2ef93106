pub mod availability_blocks;
pub mod bookings;
pub mod invoices;
pub mod time_slots;
pub mod wedding_forms;
