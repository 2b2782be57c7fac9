//! Library error type.

use std::path::PathBuf;
use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The API key file could not be read. Fatal at startup.
    #[error("error reading API key from {}: {source}", path.display())]
    Credential {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The chart was asked to render without a single bar.
    #[error("no data to chart for \"{0}\"")]
    NoBars(String),
    /// Plotters reported a drawing failure.
    #[error("chart drawing failed: {0}")]
    Render(String),
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
