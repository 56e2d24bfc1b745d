//! Error types for boxpack.

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::MAX_DIMENSION;

/// Result type alias for packing operations.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors raised by the packing engine.
///
/// Failing to place an item is not an error; it shows up as an unplaced item in
/// the report instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    /// The bin and item catalogs do not satisfy the strategy's requirements.
    /// Raised before any placement work happens.
    #[error("{0}")]
    Configuration(String),

    /// A decoded record lacks a field the entity needs.
    #[error("{kind} record `{id}` is missing required field `{field}`")]
    MissingField {
        kind: &'static str,
        id: String,
        field: &'static str,
    },

    /// A dimension is zero, negative or above [`MAX_DIMENSION`].
    #[error("{kind} `{id}` has {field} {value} outside 1..={max}", max = MAX_DIMENSION)]
    InvalidDimension {
        kind: &'static str,
        id: String,
        field: &'static str,
        value: i64,
    },

    /// Two entries of the same collection share an id.
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
}

/// Errors that can occur while loading configuration or payload files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A file could not be read.
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A payload file is not valid JSON for the expected shape.
    #[error("failed to parse payload {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration file is not valid TOML for the expected shape.
    #[error("failed to parse configuration file {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    Validation { message: String },

    /// The payload decoded but its records are unusable.
    #[error(transparent)]
    Pack(#[from] PackError),
}
