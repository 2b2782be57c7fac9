use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use gdp_compare::config::{
    DEFAULT_BASE_URL, DEFAULT_CATEGORY, DEFAULT_CHART_PX, DEFAULT_GROUP, DEFAULT_KEY_FILE,
    DEFAULT_LISTEN,
};
use gdp_compare::server::{self, AppState};
use gdp_compare::{Client, Credential, Settings, report};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "gdp-compare",
    version,
    about = "Compare Full Year GDP Growth of two countries and serve it as a bar chart"
)]
struct Cli {
    /// First country, exactly as the API expects it (e.g. mexico)
    country1: String,
    /// Second country, exactly as the API expects it (e.g. sweden)
    country2: String,
    /// File holding the API key (used verbatim, no trimming)
    #[arg(long, default_value = DEFAULT_KEY_FILE)]
    key_file: PathBuf,
    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Indicator group requested from the API
    #[arg(long, default_value = DEFAULT_GROUP)]
    group: String,
    /// Indicator category to report and chart (exact match)
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    category: String,
    /// Minimum seconds between the two API requests
    #[arg(long, default_value_t = 5)]
    interval_secs: u64,
    /// Address the chart server listens on
    #[arg(long, default_value = DEFAULT_LISTEN)]
    listen: SocketAddr,
    /// Chart width in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_PX)]
    chart_width: u32,
    /// Chart height in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_PX)]
    chart_height: u32,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            base_url: self.base_url.clone(),
            group: self.group.clone(),
            category: self.category.clone(),
            key_file: self.key_file.clone(),
            min_interval: Duration::from_secs(self.interval_secs),
            listen: self.listen,
            chart_width_px: self.chart_width,
            chart_height_px: self.chart_height,
        }
    }
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Fewer than two countries: show usage and stop without an error status.
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            e.print()?;
            return Ok(());
        }
        Err(e) => e.exit(),
    };
    // Log lines go to stdout next to the report, like the rest of the startup output.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let settings = cli.settings();
    let key = Credential::load(&settings.key_file).context("cannot start without an API key")?;

    let mut client = Client::new(&settings, key)?;
    let stdout = std::io::stdout();
    let comparison = {
        let mut out = stdout.lock();
        let cmp = client.fetch_comparison(&cli.country1, &cli.country2, &mut out)?;
        report::write_report(&mut out, &settings.category, &cmp.datasets())?;
        out.flush()?;
        cmp
    };

    let state = AppState::new(comparison, settings.category.clone())
        .with_chart_size(settings.chart_width_px, settings.chart_height_px);
    let rt = tokio::runtime::Runtime::new().context("start async runtime")?;
    rt.block_on(server::serve(settings.listen, state))
        .with_context(|| format!("serving on {}", settings.listen))?;
    Ok(())
}
