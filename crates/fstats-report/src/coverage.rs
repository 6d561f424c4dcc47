//! Per-field coverage.

use std::fmt;

use fstats_solr::{Filter, IndexQuery, QueryFailure};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

/// Report column names, in output order.
pub const COLUMNS: [&str; 5] = [
    "field_name",
    "existing",
    "existing_percentage",
    "notexisting",
    "notexisting_percentage",
];

/// Share of the document population, rendered with exactly two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(f64);

impl Percentage {
    /// `count` as a percentage of `total`; `0.00` when `total` is zero.
    pub fn of(count: u64, total: u64) -> Self {
        if total == 0 {
            return Self(0.0);
        }
        Self(count as f64 / total as f64 * 100.0)
    }

    /// The unrounded value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How many documents hold and lack one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRecord {
    /// Field name.
    #[serde(rename = "field_name")]
    pub field: String,
    /// Documents holding the field.
    pub existing: u64,
    /// `existing` relative to the document total.
    pub existing_percentage: Percentage,
    /// Documents lacking the field.
    #[serde(rename = "notexisting")]
    pub not_existing: u64,
    /// `not_existing` relative to the document total.
    #[serde(rename = "notexisting_percentage")]
    pub not_existing_percentage: Percentage,
}

impl CoverageRecord {
    /// Builds a record from the two counts.
    pub fn new(field: impl Into<String>, existing: u64, not_existing: u64, total: u64) -> Self {
        Self {
            field: field.into(),
            existing,
            existing_percentage: Percentage::of(existing, total),
            not_existing,
            not_existing_percentage: Percentage::of(not_existing, total),
        }
    }

    /// Cell values in `COLUMNS` order.
    pub fn values(&self) -> [String; 5] {
        [
            self.field.clone(),
            self.existing.to_string(),
            self.existing_percentage.to_string(),
            self.not_existing.to_string(),
            self.not_existing_percentage.to_string(),
        ]
    }
}

/// Counts the documents holding and lacking `field`.
///
/// Both counts must succeed; a failure of either is returned as is.
pub fn coverage<I>(
    index: &I,
    field: &str,
    records_total: u64,
) -> Result<CoverageRecord, QueryFailure>
where
    I: IndexQuery + ?Sized,
{
    let existing = index.count(&Filter::exists(field))?;
    let not_existing = index.count(&Filter::missing(field))?;

    if existing.checked_add(not_existing) != Some(records_total) {
        warn!(
            field,
            existing,
            not_existing,
            records_total,
            "counts do not add up to the total; was the collection modified during the run?"
        );
    }
    debug!(field, existing, not_existing, "computed coverage");

    Ok(CoverageRecord::new(field, existing, not_existing, records_total))
}
