//! Error types for the fstats-solr crate.

use std::time::Duration;

use thiserror::Error;
use url::ParseError;

/// A failed request against a Solr collection.
///
/// Every failure carries enough context to reproduce the request by hand: the collection, the
/// endpoint it lives on, and the full URL that was issued.
#[derive(Debug, Error)]
#[error(
    "Solr collection \"{collection}\" at \"{endpoint}\" could not execute request \"{request}\" successfully: {kind}"
)]
pub struct QueryFailure {
    /// Name of the collection (core) being queried.
    pub collection: String,
    /// Base URI of the Solr instance.
    pub endpoint: String,
    /// The request that was issued.
    pub request: String,
    /// What went wrong.
    pub kind: QueryFailureKind,
}

/// The specific kind of query failure.
#[derive(Debug, Error)]
pub enum QueryFailureKind {
    /// The server answered with a non-success status.
    #[error("got status {status} ({})", .body.as_deref().unwrap_or("empty response"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if the server sent one.
        body: Option<String>,
    },

    /// The response decoded but lacked the expected shape.
    #[error("expected {expected}, got response {body:?}")]
    UnexpectedResponse {
        /// Description of the expected payload.
        expected: &'static str,
        /// The response body as received.
        body: String,
    },

    /// The request did not complete within the per-call timeout.
    #[error("timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// Connection or protocol failure below HTTP status level.
    #[error("{message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The request URL could not be formed from the endpoint and collection.
    #[error("invalid request URL: {source}")]
    InvalidUrl {
        /// Parse error from the URL parser.
        source: ParseError,
    },
}

impl QueryFailure {
    /// Creates a failure for `request` against `collection` on `endpoint`.
    pub fn new(
        collection: impl Into<String>,
        endpoint: impl Into<String>,
        request: impl Into<String>,
        kind: QueryFailureKind,
    ) -> Self {
        Self {
            collection: collection.into(),
            endpoint: endpoint.into(),
            request: request.into(),
            kind,
        }
    }

    /// Returns the HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            QueryFailureKind::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}
