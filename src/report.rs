//! Plain-text comparison table printed at startup.

use crate::models::CountryDataset;
use std::io::{self, Write};

pub use crate::config::DEFAULT_CATEGORY as GDP_GROWTH_CATEGORY;

pub const HEADER: &str = "Category\t\t\tLatest Value";
pub const RULE: &str = "-------------------------------------------------";

/// Format one table row. The label is the country as given on the command line.
pub fn format_row(category: &str, country: &str, value: f64) -> String {
    format!("{} ({})\t\t{:.2}", category, country, value)
}

/// Write the header, then one row per record matching `category`, dataset by dataset.
///
/// A dataset without matches contributes nothing.
pub fn write_report<W: Write>(
    out: &mut W,
    category: &str,
    datasets: &[&CountryDataset],
) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{RULE}")?;
    for ds in datasets {
        for rec in ds.matching(category) {
            writeln!(out, "{}", format_row(&rec.category, &ds.country, rec.latest_value))?;
        }
    }
    Ok(())
}

/// Echo a raw upstream body. A missing body prints as empty.
pub fn write_raw<W: Write>(out: &mut W, country: &str, body: Option<&[u8]>) -> io::Result<()> {
    let text = body.map(String::from_utf8_lossy).unwrap_or_default();
    writeln!(out, "Raw Data for {} : {}", country, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndicatorRecord;

    fn rec(category: &str, value: f64) -> IndicatorRecord {
        IndicatorRecord {
            country: "Mexico".into(),
            category: category.into(),
            latest_value: value,
        }
    }

    #[test]
    fn row_has_two_decimals() {
        assert_eq!(
            format_row(GDP_GROWTH_CATEGORY, "Mexico", 1.234),
            "Full Year GDP Growth (Mexico)\t\t1.23"
        );
        assert_eq!(
            format_row(GDP_GROWTH_CATEGORY, "Mexico", -0.5),
            "Full Year GDP Growth (Mexico)\t\t-0.50"
        );
    }

    #[test]
    fn header_only_without_matches() {
        let ds = CountryDataset::new("Mexico", vec![rec("GDP", 1.0)]);
        let mut out = Vec::new();
        write_report(&mut out, GDP_GROWTH_CATEGORY, &[&ds]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{HEADER}\n{RULE}\n"));
    }

    #[test]
    fn raw_none_prints_empty() {
        let mut out = Vec::new();
        write_raw(&mut out, "Mexico", None).unwrap();
        assert_eq!(out, b"Raw Data for Mexico : \n");
    }
}
