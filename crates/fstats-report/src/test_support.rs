//! In-memory `IndexQuery` used by the unit tests.

use std::{cell::RefCell, collections::BTreeMap};

use fstats_solr::{Filter, IndexQuery, QueryFailure, QueryFailureKind};

/// Query that the fake answers with a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailAt {
    /// The schema query.
    Schema,
    /// The used-fields query.
    UsedFields,
    /// A count query for this exact filter.
    Count(Filter),
}

/// Fake collection with fixed field lists and counts that logs every query issued.
pub struct FakeIndex {
    /// Declared schema fields.
    schema: Vec<String>,
    /// Fields in the CSV header row.
    used: Vec<String>,
    /// Total document count.
    total: u64,
    /// Documents holding each field.
    present: BTreeMap<String, u64>,
    /// Overrides for the missing-count of a field.
    missing: BTreeMap<String, u64>,
    /// Query to fail, if any.
    fail_at: Option<FailAt>,
    /// Queries issued, in order.
    log: RefCell<Vec<String>>,
}

impl FakeIndex {
    /// Creates a fake where no document holds any field.
    pub fn new(schema: &[&str], used: &[&str], total: u64) -> Self {
        Self {
            schema: schema.iter().map(|s| (*s).to_string()).collect(),
            used: used.iter().map(|s| (*s).to_string()).collect(),
            total,
            present: BTreeMap::new(),
            missing: BTreeMap::new(),
            fail_at: None,
            log: RefCell::new(Vec::new()),
        }
    }

    /// Sets how many documents hold `field`.
    pub fn present(mut self, field: &str, count: u64) -> Self {
        self.present.insert(field.to_string(), count);
        self
    }

    /// Forces the missing-count of `field`, as if the index changed between queries.
    pub fn missing(mut self, field: &str, count: u64) -> Self {
        self.missing.insert(field.to_string(), count);
        self
    }

    /// Makes the given query fail.
    pub fn failing(mut self, at: FailAt) -> Self {
        self.fail_at = Some(at);
        self
    }

    /// Queries issued so far: `schema`, `used_fields`, or the rendered filter.
    pub fn issued(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Logs `entry` and fails if `at` is the configured failure point.
    fn record(&self, entry: String, at: &FailAt, request: &str) -> Result<(), QueryFailure> {
        self.log.borrow_mut().push(entry);
        if self.fail_at.as_ref() == Some(at) {
            return Err(QueryFailure::new(
                "books",
                "http://fake/solr/",
                format!("http://fake/solr/books/{request}"),
                QueryFailureKind::UnexpectedResponse {
                    expected: "a well-formed response",
                    body: "{}".to_string(),
                },
            ));
        }
        Ok(())
    }
}

impl IndexQuery for FakeIndex {
    fn schema_fields(&self) -> Result<Vec<String>, QueryFailure> {
        self.record("schema".to_string(), &FailAt::Schema, "schema?wt=json")?;
        Ok(self.schema.clone())
    }

    fn used_fields(&self) -> Result<Vec<String>, QueryFailure> {
        self.record(
            "used_fields".to_string(),
            &FailAt::UsedFields,
            "select?q=*%3A*&rows=0&wt=csv",
        )?;
        Ok(self.used.clone())
    }

    fn count(&self, filter: &Filter) -> Result<u64, QueryFailure> {
        self.record(
            filter.to_string(),
            &FailAt::Count(filter.clone()),
            &format!("select?q={filter}&rows=0&wt=json"),
        )?;
        let present = |field: &str| self.present.get(field).copied().unwrap_or(0);
        Ok(match filter {
            Filter::All => self.total,
            Filter::Exists(field) => present(field),
            Filter::Missing(field) => match self.missing.get(field) {
                Some(&count) => count,
                None => self.total.saturating_sub(present(field)),
            },
        })
    }
}
