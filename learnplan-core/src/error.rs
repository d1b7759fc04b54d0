//! Error types for learnplan.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, rescheduling or syncing a plan.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schedule file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Invalid date: year {year}, month {month}")]
    InvalidDate { year: i32, month: u32 },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for learnplan operations.
pub type PlanResult<T> = Result<T, PlanError>;
