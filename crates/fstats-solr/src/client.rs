//! Blocking HTTP client bound to one Solr collection.

use std::{error::Error, time::Duration};

use reqwest::{StatusCode, Url, blocking::Client as HttpClient};
use tracing::debug;

use crate::{
    Endpoint, IndexQuery, QueryFailure, QueryFailureKind,
    query::{Filter, ResultFormat},
    response::{self, EXPECTED_HEADER_ROW, EXPECTED_NUM_FOUND, EXPECTED_SCHEMA},
};

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport options for `SolrClient`.
#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    /// Upper bound on each request, connect through body.
    pub timeout: Duration,
    /// Route requests through proxies named by the `HTTP_PROXY` family of variables.
    pub system_proxy: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            system_proxy: true,
        }
    }
}

/// Issues read-only queries against a single collection.
///
/// Each call is an independent GET request; there are no retries.
pub struct SolrClient {
    /// Underlying HTTP client, configured with the request timeout.
    http: HttpClient,
    /// Base URI of the Solr instance.
    endpoint: Endpoint,
    /// Collection (core) name.
    collection: String,
    /// Timeout applied to each request, kept for diagnostics.
    timeout: Duration,
}

impl SolrClient {
    /// Creates a client for `collection` on `endpoint`.
    pub fn new(
        endpoint: Endpoint,
        collection: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, QueryFailure> {
        let collection = collection.into();
        let mut builder = HttpClient::builder().timeout(options.timeout);
        if !options.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(|e| {
            QueryFailure::new(
                collection.clone(),
                endpoint.as_str(),
                endpoint.as_str(),
                QueryFailureKind::Transport {
                    message: format!("failed to build HTTP client: {}", error_chain(&e)),
                },
            )
        })?;

        Ok(Self {
            http,
            endpoint,
            collection,
            timeout: options.timeout,
        })
    }

    /// Runs a zero-row select for `filter` and returns the undecoded body.
    pub fn query(&self, filter: &Filter, format: ResultFormat) -> Result<String, QueryFailure> {
        let url = self.select_url(filter, format)?;
        self.fetch(&url)
    }

    /// URL of a zero-row select request.
    fn select_url(&self, filter: &Filter, format: ResultFormat) -> Result<Url, QueryFailure> {
        let mut url = self.handler_url("select")?;
        url.query_pairs_mut()
            .append_pair("q", &filter.to_string())
            .append_pair("rows", "0")
            .append_pair("wt", format.writer_type());
        Ok(url)
    }

    /// URL of the schema request.
    fn schema_url(&self) -> Result<Url, QueryFailure> {
        let mut url = self.handler_url("schema")?;
        url.query_pairs_mut()
            .append_pair("wt", ResultFormat::Json.writer_type());
        Ok(url)
    }

    /// URL of a request handler for this collection.
    fn handler_url(&self, handler: &str) -> Result<Url, QueryFailure> {
        self.endpoint
            .handler_url(&self.collection, handler)
            .map_err(|source| {
                self.failure(
                    format!("{}{}/{handler}", self.endpoint, self.collection),
                    QueryFailureKind::InvalidUrl { source },
                )
            })
    }

    /// Performs a GET request and returns the body of a successful response.
    fn fetch(&self, url: &Url) -> Result<String, QueryFailure> {
        debug!(request = %url, "querying solr");

        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| self.transport_failure(url, &e))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| self.transport_failure(url, &e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "solr responded");

        if status != StatusCode::OK {
            return Err(self.failure(
                url.as_str(),
                QueryFailureKind::Status {
                    status: status.as_u16(),
                    body: (!body.is_empty()).then_some(body),
                },
            ));
        }
        Ok(body)
    }

    /// Builds a failure for this collection.
    fn failure(&self, request: impl Into<String>, kind: QueryFailureKind) -> QueryFailure {
        QueryFailure::new(
            self.collection.clone(),
            self.endpoint.as_str(),
            request,
            kind,
        )
    }

    /// Builds a failure for a response that lacks the expected shape.
    fn unexpected(&self, url: &Url, expected: &'static str, body: String) -> QueryFailure {
        self.failure(
            url.as_str(),
            QueryFailureKind::UnexpectedResponse { expected, body },
        )
    }

    /// Classifies a transport-level error.
    fn transport_failure(&self, url: &Url, err: &reqwest::Error) -> QueryFailure {
        let kind = if err.is_timeout() {
            QueryFailureKind::Timeout {
                timeout: self.timeout,
            }
        } else {
            QueryFailureKind::Transport {
                message: error_chain(err),
            }
        };
        self.failure(url.as_str(), kind)
    }
}

impl IndexQuery for SolrClient {
    fn schema_fields(&self) -> Result<Vec<String>, QueryFailure> {
        let url = self.schema_url()?;
        let body = self.fetch(&url)?;
        response::schema_field_names(&body)
            .ok_or_else(|| self.unexpected(&url, EXPECTED_SCHEMA, body))
    }

    fn used_fields(&self) -> Result<Vec<String>, QueryFailure> {
        // A zero-row CSV projection still carries its header row, which lists every stored
        // field.
        let url = self.select_url(&Filter::All, ResultFormat::Csv)?;
        let body = self.fetch(&url)?;
        response::header_row_columns(&body)
            .ok_or_else(|| self.unexpected(&url, EXPECTED_HEADER_ROW, body))
    }

    fn count(&self, filter: &Filter) -> Result<u64, QueryFailure> {
        let url = self.select_url(filter, ResultFormat::Json)?;
        let body = self.fetch(&url)?;
        response::num_found(&body).ok_or_else(|| self.unexpected(&url, EXPECTED_NUM_FOUND, body))
    }
}

/// Joins an error with all of its sources.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
