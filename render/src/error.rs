//! Error types for rendering and image output

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load font file {path}")]
    LoadFont {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no fonts found for rendering labels")]
    NoFonts,

    #[error("font family '{0}' is not installed")]
    UnknownFamily(String),

    #[error("failed to encode PNG")]
    Encode(#[from] png::EncodingError),

    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
