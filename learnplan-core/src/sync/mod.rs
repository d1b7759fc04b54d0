mod engine;
mod payload;
mod report;

pub use engine::SyncEngine;
pub use payload::{event_description, event_payload, event_title};
pub use report::{RowFailure, RowOutcome, SyncReport};

#[cfg(test)]
mod tests;
