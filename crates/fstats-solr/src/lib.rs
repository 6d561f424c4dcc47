//! Solr query client for solr-fstats.
//!
//! Talks to one collection of one Solr instance over HTTP: schema introspection, the list of
//! fields used by stored documents, and document counts for a filter. All requests are
//! read-only, blocking, bounded by a timeout, and never retried.

#![warn(missing_docs)]

mod client;
mod endpoint;
mod error;
mod index;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod query;
mod response;

pub use client::{ClientOptions, DEFAULT_TIMEOUT, SolrClient};
pub use endpoint::Endpoint;
pub use error::{QueryFailure, QueryFailureKind};
pub use index::IndexQuery;
pub use query::{Filter, ResultFormat};
