use gdp_compare::models::{CountryDataset, IndicatorRecord};
use gdp_compare::report::{self, GDP_GROWTH_CATEGORY};

fn rec(country: &str, category: &str, value: f64) -> IndicatorRecord {
    IndicatorRecord {
        country: country.into(),
        category: category.into(),
        latest_value: value,
    }
}

#[test]
fn table_lists_first_country_then_second() {
    let first = CountryDataset::new(
        "mexico",
        vec![
            rec("Mexico", "GDP", 1789.11),
            rec("Mexico", GDP_GROWTH_CATEGORY, 3.2),
        ],
    );
    let second = CountryDataset::new("sweden", vec![rec("Sweden", GDP_GROWTH_CATEGORY, -0.2)]);

    let mut out = Vec::new();
    report::write_report(&mut out, GDP_GROWTH_CATEGORY, &[&first, &second]).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(
        text,
        "Category\t\t\tLatest Value\n\
         -------------------------------------------------\n\
         Full Year GDP Growth (mexico)\t\t3.20\n\
         Full Year GDP Growth (sweden)\t\t-0.20\n"
    );
}

#[test]
fn empty_dataset_adds_no_rows() {
    let first = CountryDataset::empty("mexico");
    let second = CountryDataset::new("sweden", vec![rec("Sweden", GDP_GROWTH_CATEGORY, 2.0)]);

    let mut out = Vec::new();
    report::write_report(&mut out, GDP_GROWTH_CATEGORY, &[&first, &second]).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("(mexico)"));
}

#[test]
fn label_is_the_requested_country_not_the_record_field() {
    let ds = CountryDataset::new("united states", vec![rec("United States", GDP_GROWTH_CATEGORY, 2.5)]);
    let mut out = Vec::new();
    report::write_report(&mut out, GDP_GROWTH_CATEGORY, &[&ds]).unwrap();
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Full Year GDP Growth (united states)\t\t2.50"));
}

#[test]
fn raw_body_is_echoed_lossily() {
    let mut out = Vec::new();
    report::write_raw(&mut out, "mexico", Some(b"[]")).unwrap();
    report::write_raw(&mut out, "sweden", Some(&[b'o', b'k', 0xff])).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "Raw Data for mexico : []\nRaw Data for sweden : ok\u{fffd}\n");
}
