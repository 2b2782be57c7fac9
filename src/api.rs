//! Blocking client for the Trading Economics **country indicators** endpoint.
//!
//! Only one endpoint shape is used: `GET {base}/country/{name}?c={key}&group={group}`,
//! answering with a JSON array of indicator rows, or with an error object
//! (`{"Message": "..."}`) when something is wrong with the key or the query.
//!
//! ### Notes
//! - No status check: a non-2xx answer still carries a JSON body, and the parser's
//!   fallback to the error shape is what surfaces it.
//! - Failures never propagate. A failed fetch or an undecodable body is logged and
//!   turns into an empty dataset for that country.
//! - Requests go through a [`RequestPacer`], so two fetches are strictly sequential
//!   and start at least `min_interval` apart.
//!
//! Typical usage:
//! ```no_run
//! # use gdp_compare::{Client, Credential, Settings};
//! let settings = Settings::default();
//! let mut client = Client::new(&settings, Credential::load(&settings.key_file)?)?;
//! let comparison = client.fetch_comparison("mexico", "sweden", &mut std::io::stdout())?;
//! # Ok::<(), gdp_compare::Error>(())
//! ```
use crate::config::{Credential, Settings};
use crate::error::Result;
use crate::models::{ApiResponse, Comparison, CountryDataset, ErrorEnvelope, IndicatorRecord};
use crate::pacing::{Clock, RequestPacer, SystemClock};
use crate::report;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use std::io::Write;

#[derive(Debug)]
pub struct Client<C: Clock = SystemClock> {
    pub base_url: String,
    pub group: String,
    credential: Credential,
    http: HttpClient,
    pacer: RequestPacer<C>,
}

// Allow -, _, . and ~ unescaped (RFC 3986 unreserved)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn enc(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, SAFE).to_string()
}

impl Client<SystemClock> {
    pub fn new(settings: &Settings, credential: Credential) -> Result<Self> {
        Self::with_clock(settings, credential, SystemClock)
    }
}

impl<C: Clock> Client<C> {
    /// Build a client whose request pacing runs on `clock`.
    pub fn with_clock(settings: &Settings, credential: Credential, clock: C) -> Result<Self> {
        // Library defaults: no timeout override, default redirect policy.
        let http = HttpClient::builder()
            .user_agent(concat!("gdp-compare/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            group: settings.group.clone(),
            credential,
            http,
            pacer: RequestPacer::with_clock(settings.min_interval, clock),
        })
    }

    /// Full request URL for `country`. Contains the key, so never log it.
    pub fn country_url(&self, country: &str) -> String {
        format!(
            "{}/country/{}?c={}&group={}",
            self.base_url,
            enc(country),
            enc(self.credential.expose()),
            enc(&self.group)
        )
    }

    /// Fetch the raw body for one country.
    ///
    /// Returns the body bytes whatever the HTTP status was, or `None` when the
    /// request or the body read failed at the transport level.
    pub fn fetch_raw(&mut self, country: &str) -> Option<Vec<u8>> {
        self.pacer.wait_turn();
        let url = self.country_url(country);
        let resp = match self.http.get(&url).send() {
            Ok(r) => r,
            Err(e) => {
                log::error!("GET country/{}: {}", country, e.without_url());
                return None;
            }
        };
        log::debug!("GET country/{} -> HTTP {}", country, resp.status());
        match resp.bytes() {
            Ok(b) => Some(b.to_vec()),
            Err(e) => {
                log::error!("reading body for {}: {}", country, e.without_url());
                None
            }
        }
    }

    /// Fetch both countries in order, echo each raw body to `out`, then decode.
    ///
    /// The pacer keeps the second request at least `min_interval` after the first.
    pub fn fetch_comparison<W: Write>(
        &mut self,
        first: &str,
        second: &str,
        out: &mut W,
    ) -> Result<Comparison> {
        let raw_first = self.fetch_raw(first);
        report::write_raw(out, first, raw_first.as_deref())?;

        let raw_second = self.fetch_raw(second);
        report::write_raw(out, second, raw_second.as_deref())?;

        Ok(Comparison::new(
            dataset_from_body(first, raw_first.as_deref()),
            dataset_from_body(second, raw_second.as_deref()),
        ))
    }

    pub fn pacer(&self) -> &RequestPacer<C> {
        &self.pacer
    }
}

/// Decode a body: record array first, error envelope as the fallback.
///
/// A `null` body counts as an empty record array, and any JSON object is an
/// envelope. `Err` means neither shape matched; it carries the fallback's decode error.
pub fn parse_response(raw: &[u8]) -> std::result::Result<ApiResponse, serde_json::Error> {
    match serde_json::from_slice::<Option<Vec<IndicatorRecord>>>(raw) {
        Ok(records) => Ok(ApiResponse::Records(records.unwrap_or_default())),
        Err(_) => serde_json::from_slice::<ErrorEnvelope>(raw)
            .map(|env| ApiResponse::UpstreamError(env.message)),
    }
}

/// Turn a fetched body into a dataset, degrading every failure to "no data".
pub fn dataset_from_body(country: &str, raw: Option<&[u8]>) -> CountryDataset {
    let Some(raw) = raw else {
        log::warn!("no data received for {}", country);
        return CountryDataset::empty(country);
    };
    match parse_response(raw) {
        Ok(ApiResponse::Records(records)) => {
            log::debug!("{}: {} indicator rows", country, records.len());
            CountryDataset::new(country, records)
        }
        Ok(ApiResponse::UpstreamError(message)) => {
            log::error!("Error: {}", message);
            CountryDataset::empty(country)
        }
        Err(e) => {
            log::error!("Error parsing data: {}", e);
            CountryDataset::empty(country)
        }
    }
}
