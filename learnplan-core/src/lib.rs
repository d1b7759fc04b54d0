//! Core of learnplan.
//!
//! - `store` reads and writes the CSV plan
//! - `week` maps (year, month, week-of-month) to Saturday-anchored weeks
//! - `reschedule` pushes part of the plan back
//! - `sync` mirrors the plan into a calendar through a `remote::CalendarApi`

pub mod config;
pub mod error;
pub mod event;
pub mod remote;
pub mod reschedule;
pub mod row;
pub mod store;
pub mod sync;
pub mod week;

pub use error::{PlanError, PlanResult};
pub use row::{ScheduleRow, SyncKey};
pub use store::{Columns, Schedule};
