// src/error.rs
use std::time::Duration;

use thiserror::Error;

/// Why the sheet could not be turned into rows.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("sheet decoder not ready after {} ms", .waited.as_millis())]
    DependencyUnavailable { waited: Duration },

    #[error("ไม่พบไฟล์ {resource} (HTTP {status})")]
    ResourceNotFound { resource: String, status: u16 },

    #[error("fetch {resource} failed: {reason}")]
    Transport { resource: String, reason: String },

    #[error("read {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("not a spreadsheet container: {0}")]
    NotAContainer(String),
    #[error("workbook part missing: {0}")]
    MissingPart(String),
    #[error("XML parse error in {part}: {reason}")]
    Xml { part: String, reason: String },
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("shared string index {0} out of bounds")]
    SharedStringOutOfBounds(usize),
    #[error("invalid cell address: {0}")]
    InvalidAddress(String),
    #[error("container has too many entries: {entries} (limit {limit})")]
    TooManyEntries { entries: usize, limit: usize },
    #[error("part '{part}' is too large: {size} bytes (limit {limit})")]
    PartTooLarge { part: String, size: u64, limit: u64 },
    #[error("container inflates past {limit} bytes")]
    TotalTooLarge { limit: u64 },
}

/// Host bridge failures. Never surfaced past `bridge::init_best_effort`
/// or the dial fallback.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host bridge not available")]
    Unavailable,
    #[error("missing app id")]
    MissingAppId,
    #[error("invalid app id: {0}")]
    InvalidAppId(String),
    #[error("bridge not initialized")]
    NotInitialized,
    #[error("open window failed: {0}")]
    Launch(String),
}

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

#[derive(Debug, Error)]
#[error("navigation failed: {0}")]
pub struct NavigateError(pub String);
