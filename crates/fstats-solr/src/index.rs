//! Backend-neutral view of a searchable collection.

use crate::{QueryFailure, query::Filter};

/// Read-only queries the field statistics need from a collection.
///
/// `SolrClient` is the production implementation; the trait exists so callers can be driven by
/// other backends or by in-memory fakes.
pub trait IndexQuery {
    /// Names of the fields declared by the collection's schema, in schema order.
    fn schema_fields(&self) -> Result<Vec<String>, QueryFailure>;

    /// Names of the fields that occur in at least one stored document.
    fn used_fields(&self) -> Result<Vec<String>, QueryFailure>;

    /// Number of documents matching `filter`.
    fn count(&self, filter: &Filter) -> Result<u64, QueryFailure>;
}
