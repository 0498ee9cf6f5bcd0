use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Text rendered for a metric that could not be derived from the data.
pub const UNAVAILABLE: &str = "N/A";

/// A single derived value in a `MetricsProfile`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A decimal figure, already rounded to its reporting precision.
    Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Integer(i64),
    Text(String),
    Flag(bool),
    /// Explicit sentinel for values the data cannot support.
    Unavailable,
}

impl MetricValue {
    /// Rounds `value` to `dp` decimal places, half-to-even on its exact binary value.
    ///
    /// `2.675` is stored just below the midpoint, so it rounds to `2.67`. The figure
    /// keeps at least one fractional digit (`8.0`, `12.3`) and otherwise drops
    /// trailing zeros. Non-finite inputs become `Unavailable`.
    pub fn rounded(value: f64, dp: u32) -> Self {
        match Decimal::from_f64_retain(value) {
            Some(d) if value.is_finite() => MetricValue::Number(reporting_form(
                d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven),
            )),
            _ => MetricValue::Unavailable,
        }
    }

    /// An unrounded figure (e.g. a raw risk score as supplied), in its shortest form.
    pub fn raw(value: f64) -> Self {
        match Decimal::from_f64(value) {
            Some(d) if value.is_finite() => MetricValue::Number(reporting_form(d)),
            _ => MetricValue::Unavailable,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        MetricValue::Text(value.into())
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, MetricValue::Unavailable)
    }
}

/// Trailing zeros trimmed down to a single fractional digit. Zero is unsigned.
fn reporting_form(d: Decimal) -> Decimal {
    let mut d = d.normalize();
    if d.is_zero() {
        d.set_sign_positive(true);
    }
    if d.scale() == 0 {
        d.rescale(1);
    }
    d
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(d) => write!(f, "{}", d),
            MetricValue::Integer(i) => write!(f, "{}", i),
            MetricValue::Text(s) => f.write_str(s),
            MetricValue::Flag(b) => write!(f, "{}", b),
            MetricValue::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        MetricValue::Integer(value as i64)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Flag(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

/// Every variable a template may reference, derived from one `FundDataset`.
///
/// Keys are kept in sorted order so that serialized profiles are stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MetricsProfile {
    values: BTreeMap<String, MetricValue>,
}

impl MetricsProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
