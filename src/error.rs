//! Error types
//!
//! Only configuration problems are errors. Commands against unknown ids or
//! a busy wheel are ordinary outcomes and never show up here.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid weighted-item configuration for the prize wheel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("wheel needs at least one item")]
    EmptyItems,
    #[error("item {id} has invalid weight {weight}; weights must be positive and finite")]
    InvalidWeight { id: u32, weight: f64 },
    #[error("item id {id} appears more than once")]
    DuplicateId { id: u32 },
    #[error("total weight must be positive, got {0}")]
    NonPositiveTotal(f64),
    #[error("cannot change wheel items while a spin is in progress")]
    Busy,
}

/// Errors raised while loading or validating [`crate::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid prize table: {0}")]
    Wheel(#[from] WheelError),
    /// A numeric setting outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidValue(&'static str),
}
