//! Field coverage statistics for Solr collections.
//!
//! For every field declared by a collection's schema or used by its documents, counts how many
//! documents hold the field and how many lack it. The pipeline is strictly sequential: discover
//! fields, fetch the document total once, then two count queries per field in name order. Any
//! failed query ends the run.

#![warn(missing_docs)]

mod coverage;
mod fields;
mod report;
#[cfg(test)]
mod test_support;

pub use coverage::{COLUMNS, CoverageRecord, Percentage, coverage};
pub use fields::{FieldSet, discover_fields};
pub use report::{Report, build_report, run};
