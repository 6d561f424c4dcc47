//! Decoding of Solr response bodies.
//!
//! Each decoder returns `None` when the body lacks the expected shape; the client turns that
//! into a `QueryFailure` carrying the request and the raw body.

use serde::Deserialize;

/// Delimiter between column names in a CSV header row.
pub const USED_FIELDS_DELIMITER: char = ',';

/// Expected shape of a schema response, for diagnostics.
pub const EXPECTED_SCHEMA: &str = "a schema payload with \"schema\" -> \"fields\"";

/// Expected shape of a select response, for diagnostics.
pub const EXPECTED_NUM_FOUND: &str = "a select payload with \"response\" -> \"numFound\"";

/// Expected shape of a zero-row CSV response, for diagnostics.
pub const EXPECTED_HEADER_ROW: &str = "exactly one line of column names";

/// Response of the schema API.
#[derive(Deserialize)]
struct SchemaResponse {
    /// Schema definition.
    schema: Schema,
}

/// Schema definition, reduced to its declared fields.
#[derive(Deserialize)]
struct Schema {
    /// Declared fields.
    fields: Vec<SchemaField>,
}

/// A declared schema field.
#[derive(Deserialize)]
struct SchemaField {
    /// Field name.
    name: String,
}

/// Response of the select handler.
#[derive(Deserialize)]
struct SelectResponse {
    /// Result set header.
    response: ResultSet,
}

/// Result set header of a select response.
#[derive(Deserialize)]
struct ResultSet {
    /// Total number of matching documents.
    #[serde(rename = "numFound")]
    num_found: u64,
}

/// Extracts the declared field names from a schema response.
pub fn schema_field_names(body: &str) -> Option<Vec<String>> {
    let response: SchemaResponse = serde_json::from_str(body).ok()?;
    Some(
        response
            .schema
            .fields
            .into_iter()
            .map(|field| field.name)
            .collect(),
    )
}

/// Extracts the total match count from a select response.
pub fn num_found(body: &str) -> Option<u64> {
    let response: SelectResponse = serde_json::from_str(body).ok()?;
    Some(response.response.num_found)
}

/// Splits the single header row of a zero-row CSV response into column names.
///
/// Returns `None` unless the body is exactly one line. Empty column names are skipped.
pub fn header_row_columns(body: &str) -> Option<Vec<String>> {
    let mut lines = body.lines();
    let header = lines.next()?;
    if lines.next().is_some() {
        return None;
    }
    Some(
        header
            .split(USED_FIELDS_DELIMITER)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
