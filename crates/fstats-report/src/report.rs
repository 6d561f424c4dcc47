//! Report assembly.

use fstats_solr::{Filter, IndexQuery, QueryFailure};
use serde::Serialize;
use tracing::info;

use crate::{
    coverage::{CoverageRecord, coverage},
    fields::{FieldSet, discover_fields},
};

/// Coverage of every field of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Document count the percentages are relative to.
    pub records_total: u64,
    /// One record per field, ordered by field name.
    #[serde(rename = "fields")]
    pub records: Vec<CoverageRecord>,
}

/// Discovers the collection's fields and builds their report.
pub fn run<I>(index: &I) -> Result<Report, QueryFailure>
where
    I: IndexQuery + ?Sized,
{
    let fields = discover_fields(index)?;
    build_report(index, &fields)
}

/// Computes coverage for each field in order.
///
/// The document total is fetched once and shared by all fields. The first failing query ends
/// the run; no partial report is returned.
pub fn build_report<I>(index: &I, fields: &FieldSet) -> Result<Report, QueryFailure>
where
    I: IndexQuery + ?Sized,
{
    let records_total = index.count(&Filter::All)?;
    info!(records_total, fields = fields.len(), "computing field coverage");

    let records = fields
        .iter()
        .map(|field| coverage(index, field, records_total))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Report {
        records_total,
        records,
    })
}
