use serde::{Deserialize, Serialize};

/// One indicator row as returned by the `country/{name}` endpoint.
///
/// The upstream sends many more fields per row; only these three are kept.
/// Decoding is lenient: missing fields fall back to their defaults and
/// `LatestValue` may arrive as a number or `null`; a string is a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(
        rename = "LatestValue",
        default,
        deserialize_with = "de_f64_from_number_or_null"
    )]
    pub latest_value: f64,
}

/// Error body the upstream sends instead of a record array (bad key, quota, ...).
///
/// Any JSON object decodes: the `Message` key is matched case-insensitively,
/// and a missing or `null` message leaves it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "Message")]
    pub message: String,
}

impl<'de> Deserialize<'de> for ErrorEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{IgnoredAny, MapAccess, Visitor};
        struct EnvelopeVisitor;

        impl<'de> Visitor<'de> for EnvelopeVisitor {
            type Value = ErrorEnvelope;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an error object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut env = ErrorEnvelope::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("message") {
                        env.message = map.next_value::<Option<String>>()?.unwrap_or_default();
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(env)
            }
        }

        deserializer.deserialize_map(EnvelopeVisitor)
    }
}

/// Outcome of decoding one response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The body was a record array (possibly empty).
    Records(Vec<IndicatorRecord>),
    /// The body was an error envelope; carries its message.
    UpstreamError(String),
}

/// Records fetched for one country, labelled with the identifier given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryDataset {
    pub country: String,
    pub records: Vec<IndicatorRecord>,
}

impl CountryDataset {
    pub fn new(country: impl Into<String>, records: Vec<IndicatorRecord>) -> Self {
        Self {
            country: country.into(),
            records,
        }
    }

    /// Dataset with no usable data (transport or decode failure upstream).
    pub fn empty(country: impl Into<String>) -> Self {
        Self::new(country, Vec::new())
    }

    /// Records whose category equals `category` exactly, in received order.
    pub fn matching<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a IndicatorRecord> {
        self.records.iter().filter(move |r| r.category == category)
    }
}

/// The two datasets being compared, in command-line order.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub first: CountryDataset,
    pub second: CountryDataset,
}

impl Comparison {
    pub fn new(first: CountryDataset, second: CountryDataset) -> Self {
        Self { first, second }
    }

    pub fn datasets(&self) -> [&CountryDataset; 2] {
        [&self.first, &self.second]
    }
}

/// Serde helper: parse `f64` from a JSON number or `null` (-> 0.0).
fn de_f64_from_number_or_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0.0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}
