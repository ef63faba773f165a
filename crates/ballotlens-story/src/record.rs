//! Raw records as delivered by the data source
//!
//! The data source is a JSON array of flat objects, one per observed unit
//! (a congressional district in the default story). Field values are kept
//! exactly as delivered; interpretation happens in
//! [`normalize`](crate::normalize).
//!
//! ```json
//! [
//!   { "STATE": "GA", "PARTY_R": "1", "YES": "0", "MEAN_INCOME": "61234" },
//!   { "STATE": "GA", "PARTY_R": "0", "YES": 1, "MEAN_INCOME": 58000.5 }
//! ]
//! ```

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// A single field value of a raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Interprets the value as a number.
    ///
    /// Text is trimmed and parsed; an empty string reads as zero. Booleans read
    /// as `1` and `0`. Returns `None` for null, unparsable text and non-finite
    /// numbers.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Null => return None,
            RawValue::Bool(b) => f64::from(u8::from(*b)),
            RawValue::Number(n) => *n,
            RawValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().ok()?
                }
            }
        };
        value.is_finite().then_some(value)
    }

    /// Interprets the value as a category label.
    ///
    /// Integral numbers render without a fractional part, so `1` and `"1"`
    /// name the same category.
    #[must_use]
    pub fn as_category(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Number(n) => Some(format_number(*n)),
            RawValue::Text(s) => Some(s.clone()),
        }
    }
}

#[expect(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// An immutable mapping of field names to raw values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, RawValue>);

impl Record {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open records file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("records are not a JSON array of flat objects")]
    Parse { source: serde_json::Error },
}

/// Reads records from a JSON reader.
pub fn read_records<R>(reader: R) -> Result<Vec<Record>, LoadError>
where
    R: Read,
{
    let records = serde_json::from_reader(reader).map_err(|source| LoadError::Parse { source })?;
    Ok(records)
}

/// Loads records from a JSON file.
///
/// Loading happens once per story; a failure here is fatal to the story and is
/// never retried.
pub fn load_records<P>(path: P) -> Result<Vec<Record>, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    let records = read_records(BufReader::new(file))?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
