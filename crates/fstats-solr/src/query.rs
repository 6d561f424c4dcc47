//! Query expressions and response formats.

use std::fmt;

/// A document filter, rendered as a Solr standard-parser query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every document (`*:*`).
    All,
    /// Documents holding any value for the field (`field:*`).
    Exists(String),
    /// Documents without a value for the field (`-field:*`).
    Missing(String),
}

impl Filter {
    /// Filter matching documents that contain `field`.
    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists(field.into())
    }

    /// Filter matching documents that lack `field`.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "*:*"),
            Self::Exists(field) => write!(f, "{field}:*"),
            Self::Missing(field) => write!(f, "-{field}:*"),
        }
    }
}

/// Response writer requested through the `wt` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    /// Structured key-value payload.
    Json,
    /// Flat comma-delimited rows, preceded by a header row of column names.
    Csv,
}

impl ResultFormat {
    /// Value of the `wt` request parameter.
    pub fn writer_type(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}
