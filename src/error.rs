//! Recoverable error conditions surfaced to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Exporting a chart or text artifact failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The slot has no live chart instance (nothing was drawn there).
    #[error("nothing to export: slot {slot} has no live chart")]
    NothingToExport { slot: usize },

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loading a dataset or the upload history failed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// JSON was valid but not an array of row objects.
    #[error("expected an array of row objects")]
    NotTabular,

    #[error("upload service request failed: {0}")]
    Remote(String),
}

/// The insight-text collaborator could not produce a report.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("insight request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("insight service returned HTTP {0}")]
    Status(u16),

    #[error("insight service unavailable after retries")]
    Unavailable,
}

/// A palette definition was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette must contain at least one colour")]
    Empty,

    #[error("invalid hex colour: {0:?}")]
    InvalidHex(String),
}
