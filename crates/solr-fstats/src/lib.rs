//! solr-fstats: field statistics of a Solr collection.
//!
//! For every field declared by a collection's schema or used by at least one of its documents,
//! reports how many documents hold the field and how many lack it, with percentages of the whole
//! collection. The report is printed as fully quoted CSV by default, for audits of schema
//! coverage.

#![warn(missing_docs)]

pub mod cli;
