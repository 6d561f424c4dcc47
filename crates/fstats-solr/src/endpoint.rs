//! Base URI formation for a Solr instance.

use std::fmt;

use url::{ParseError, Url};

/// Scheme assumed when the host names none.
const DEFAULT_SCHEME: &str = "http";

/// Fixed API root appended to every Solr base URI.
const API_ROOT: &str = "/solr/";

/// Base URI of a Solr instance, always ending in the `/solr/` API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Normalized base URI.
    base: String,
}

impl Endpoint {
    /// Builds the base URI from a host and an optional port.
    ///
    /// Hosts without an `http://` or `https://` prefix get `http://`; a given scheme is
    /// lowercased. The port, when given, is appended as `:port`; otherwise the scheme's default
    /// port applies.
    pub fn new(host: &str, port: Option<u16>) -> Self {
        let host = host.trim_end_matches('/');
        let mut base = match split_scheme(host) {
            Some((scheme, rest)) => format!("{}://{rest}", scheme.to_ascii_lowercase()),
            None => format!("{DEFAULT_SCHEME}://{host}"),
        };
        if let Some(port) = port {
            base.push_str(&format!(":{port}"));
        }
        base.push_str(API_ROOT);
        Self { base }
    }

    /// Returns the base URI.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Returns the URL of a request handler (`select`, `schema`, ...) for a collection.
    pub fn handler_url(&self, collection: &str, handler: &str) -> Result<Url, ParseError> {
        Url::parse(&format!("{}{collection}/{handler}", self.base))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Splits an `http://` or `https://` prefix, in any case, off the host.
fn split_scheme(host: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = host.split_once("://")?;
    (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
        .then_some((scheme, rest))
}
