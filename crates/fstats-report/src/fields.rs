//! Field discovery.
//!
//! A collection's fields come from two places: the schema declares some, and stored documents
//! use some (dynamic fields only show up there). The union of both, ordered by name, is the set
//! every report row is computed for.

use std::collections::BTreeSet;

use fstats_solr::{IndexQuery, QueryFailure};
use tracing::info;

/// Deduplicated field names in ascending byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    /// Ordered storage.
    names: BTreeSet<String>,
}

impl FieldSet {
    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set holds no fields.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates field names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl FromIterator<String> for FieldSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl Extend<String> for FieldSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.names.extend(iter);
    }
}

/// Collects the schema's declared fields and the fields used by stored documents.
///
/// The schema is queried first; if it fails, the used-fields query is never issued.
pub fn discover_fields<I>(index: &I) -> Result<FieldSet, QueryFailure>
where
    I: IndexQuery + ?Sized,
{
    let schema_fields = index.schema_fields()?;
    let used_fields = index.used_fields()?;
    let (declared, used) = (schema_fields.len(), used_fields.len());

    let mut fields: FieldSet = schema_fields.into_iter().collect();
    fields.extend(used_fields);

    info!(declared, used, distinct = fields.len(), "discovered fields");
    Ok(fields)
}
