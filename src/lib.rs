//! gdp_compare
//!
//! Compare one macroeconomic indicator between two countries: fetch both countries'
//! indicator rows from the Trading Economics API, print a small comparison table,
//! and serve the comparison as a PNG bar chart. Pairs with the `gdp-compare` CLI.
//!
//! ### Features
//! - Blocking fetch of `country/{name}` rows, paced at one request per 5 seconds
//! - Dual-shape decoding: indicator rows, or the API's `{"Message": ...}` error body
//! - Failures degrade to an empty dataset instead of aborting the run
//! - Text report and a 4x4 inch PNG bar chart of "Full Year GDP Growth"
//!
//! ### Example
//! ```no_run
//! use gdp_compare::{Client, Credential, Settings, report};
//!
//! let settings = Settings::default();
//! let key = Credential::load(&settings.key_file)?;
//! let mut client = Client::new(&settings, key)?;
//! let cmp = client.fetch_comparison("mexico", "sweden", &mut std::io::stdout())?;
//! report::write_report(&mut std::io::stdout(), &settings.category, &cmp.datasets())?;
//! let bars = gdp_compare::chart::bars_for(&settings.category, &cmp.datasets());
//! let png = gdp_compare::chart::render_png(&bars, &gdp_compare::chart::ChartSpec::default())?;
//! # Ok::<(), gdp_compare::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod pacing;
pub mod report;
pub mod server;

pub use api::Client;
pub use config::{Credential, Settings};
pub use error::{Error, Result};
pub use models::{ApiResponse, Comparison, CountryDataset, IndicatorRecord};
