//! Unified error types for sbom-forge.
//!
//! The pipeline favors graceful degradation: malformed scan records are
//! skipped and counted, identity conflicts and dangling references are
//! resolved structurally, and unknown export formats fall back to the
//! custom format. Only structurally irrecoverable states surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-forge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomError {
    /// Errors while parsing scanner output into a scan result
    #[error("Failed to parse scan output: {context}")]
    Scan {
        context: String,
        #[source]
        source: ScanErrorKind,
    },

    /// Errors during SBOM export
    #[error("SBOM export failed: {context}")]
    Export {
        context: String,
        #[source]
        source: ExportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Persistence collaborator errors
    #[error("Store operation failed: {0}")]
    Store(String),
}

/// Specific scan-ingestion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScanErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Unknown scan format: {0} (supported: spdx-json, cyclonedx-json)")]
    UnknownFormat(String),
}

/// Specific export error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(String),

    #[error("Required field '{field}' is empty on component '{reference}'")]
    MissingRequiredField { field: String, reference: String },
}

/// Convenient Result type for sbom-forge operations
pub type Result<T> = std::result::Result<T, SbomError>;

impl SbomError {
    /// Create a scan error with context
    pub fn scan(context: impl Into<String>, source: ScanErrorKind) -> Self {
        Self::Scan {
            context: context.into(),
            source,
        }
    }

    /// Create an export error with context
    pub fn export(context: impl Into<String>, source: ExportErrorKind) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

impl From<std::io::Error> for SbomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
