//! Startup configuration: the API key and the fixed knobs of a comparison run.

use crate::error::{Error, Result};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.tradingeconomics.com";
pub const DEFAULT_GROUP: &str = "gdp";
/// The one indicator category this tool compares.
pub const DEFAULT_CATEGORY: &str = "Full Year GDP Growth";
pub const DEFAULT_KEY_FILE: &str = "apikey.cfg";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
/// Minimum spacing between the starts of two upstream requests.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(5);
/// Chart edge length: 4 inches at [`DPI`](crate::chart::DPI).
pub const DEFAULT_CHART_PX: u32 = 4 * crate::chart::DPI;

/// API key, read once at startup and passed to the client by value.
///
/// Kept exactly as stored on disk (no trimming); `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the whole file as the key.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map(Self)
            .map_err(|source| Error::Credential {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Everything a run needs besides the two country identifiers.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub group: String,
    pub category: String,
    pub key_file: PathBuf,
    pub min_interval: Duration,
    pub listen: SocketAddr,
    pub chart_width_px: u32,
    pub chart_height_px: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            group: DEFAULT_GROUP.into(),
            category: DEFAULT_CATEGORY.into(),
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            min_interval: DEFAULT_MIN_INTERVAL,
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            chart_width_px: DEFAULT_CHART_PX,
            chart_height_px: DEFAULT_CHART_PX,
        }
    }
}
