//! Live tests against the real upstream (opt-in): cargo test --features online
//! Uses the public `guest:guest` key, which only covers a few countries.
#![cfg(feature = "online")]

use gdp_compare::report::GDP_GROWTH_CATEGORY;
use gdp_compare::{Client, Credential, Settings};

#[test]
fn live_guest_comparison() {
    let settings = Settings::default();
    let mut client = Client::new(&settings, Credential::new("guest:guest")).unwrap();
    let mut out = Vec::new();
    let cmp = client.fetch_comparison("mexico", "sweden", &mut out).unwrap();

    let starts = client.pacer().starts();
    assert!(starts[1] - starts[0] >= settings.min_interval);
    assert!(!cmp.first.records.is_empty() || !cmp.second.records.is_empty());
    let matches = cmp.first.matching(GDP_GROWTH_CATEGORY).count()
        + cmp.second.matching(GDP_GROWTH_CATEGORY).count();
    assert!(matches > 0, "expected at least one {GDP_GROWTH_CATEGORY} row");
}
