pub mod domain;
pub mod forms;
pub mod repository;
pub mod services;

/// Number of extra-stop slots available on each leg of a booking.
pub const STOP_SLOTS_PER_LEG: usize = 5;
