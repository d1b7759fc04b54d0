pub mod auth;
pub mod reschedule;
pub mod sync;
pub mod weeks;
