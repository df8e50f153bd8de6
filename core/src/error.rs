//! Error types for map loading and quiz operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a region table or a base map image.
///
/// Any of these makes the selected map unusable; the caller keeps whatever
/// session was active before the selection.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("region table {path} is missing the `{column}` column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("invalid row in {path} at line {line}: {reason}")]
    InvalidRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("region table {path} contains no regions")]
    EmptyTable { path: PathBuf },

    #[error("failed to decode PNG image {path}")]
    DecodeImage {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },

    #[error("failed to decode GIF image {path}")]
    DecodeGif {
        path: PathBuf,
        #[source]
        source: gif::DecodingError,
    },

    #[error("unsupported image layout in {path}: {reason}")]
    UnsupportedImage { path: PathBuf, reason: String },
}

/// Errors surfaced by the quiz controller
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("unknown map '{0}'")]
    UnknownMap(String),

    #[error("no map selected")]
    NoMapSelected,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
