pub mod authenticate;
pub mod create_calendar;
pub mod create_event;
pub mod find_calendar;
pub mod list_events;
pub mod update_event;
