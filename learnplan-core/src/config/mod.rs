//! Configuration types for learnplan.

mod learnplan_config;
mod sync_config;

pub use learnplan_config::{LearnplanConfig, expand_path};
pub use sync_config::SyncConfig;
