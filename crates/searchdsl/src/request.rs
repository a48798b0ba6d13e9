//! Request envelopes.
//!
//! A [`Dsl`] pairs a query and/or post filter with pagination bounds and a
//! sort order. An [`IndexSearchRequest`] wraps a `Dsl` together with the
//! attributes to return for each result; its document is what gets sent to
//! the search endpoint as the request body.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::ordering::SortItem;
use crate::query::Query;

/// Results per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// The search envelope: query, post filter, pagination and sort.
///
/// Built through [`Dsl::builder`]; at least one of `query` and
/// `post_filter` must be present.
///
/// ```
/// use searchdsl::{Dsl, Term};
/// use serde_json::json;
///
/// let dsl = Dsl::builder()
///     .query(Term::new("__typeName.keyword", "Schema").unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(
///     dsl.to_document(),
///     json!({"from": 0, "size": 100, "query": {"term": {"__typeName.keyword": {"value": "Schema"}}}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dsl {
    from: u32,
    size: u32,
    post_filter: Option<Query>,
    query: Option<Query>,
    sort: Vec<SortItem>,
}

impl Dsl {
    /// Starts a builder with the built-in defaults.
    pub fn builder() -> DslBuilder {
        DslBuilder::default()
    }

    /// Starts a builder seeded with the page size of `config`. The sort of
    /// `config` applies only if no [`DslBuilder::sort`] call is made.
    pub fn builder_with(config: &SearchConfig) -> DslBuilder {
        DslBuilder {
            size: config.page_size,
            default_sort: config.sort.clone(),
            ..DslBuilder::default()
        }
    }

    /// Shorthand for a first-page envelope around a single query.
    pub fn with_query(query: impl Into<Query>) -> Dsl {
        Dsl {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
            post_filter: None,
            query: Some(query.into()),
            sort: Vec::new(),
        }
    }

    /// Offset of the first result (`from` on the wire).
    pub fn offset(&self) -> u32 {
        self.from
    }

    /// Maximum number of results (`size` on the wire).
    pub fn limit(&self) -> u32 {
        self.size
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn post_filter(&self) -> Option<&Query> {
        self.post_filter.as_ref()
    }

    pub fn sort(&self) -> &[SortItem] {
        &self.sort
    }

    /// Serializes the envelope, omitting absent optional fields.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("from".into(), json!(self.from));
        doc.insert("size".into(), json!(self.size));
        if let Some(post_filter) = &self.post_filter {
            doc.insert("post_filter".into(), post_filter.to_document());
        }
        if let Some(query) = &self.query {
            doc.insert("query".into(), query.to_document());
        }
        if !self.sort.is_empty() {
            let sort = self.sort.iter().map(SortItem::to_document).collect();
            doc.insert("sort".into(), Value::Array(sort));
        }
        Value::Object(doc)
    }
}

impl Serialize for Dsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

/// Builder for [`Dsl`].
#[derive(Debug, Clone)]
pub struct DslBuilder {
    from: u32,
    size: u32,
    post_filter: Option<Query>,
    query: Option<Query>,
    sort: Vec<SortItem>,
    default_sort: Vec<SortItem>,
}

impl Default for DslBuilder {
    fn default() -> Self {
        DslBuilder {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
            post_filter: None,
            query: None,
            sort: Vec::new(),
            default_sort: Vec::new(),
        }
    }
}

impl DslBuilder {
    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets a filter applied after aggregations are computed.
    pub fn post_filter(mut self, post_filter: impl Into<Query>) -> Self {
        self.post_filter = Some(post_filter.into());
        self
    }

    /// Sets the offset of the first result.
    pub fn offset(mut self, offset: u32) -> Self {
        self.from = offset;
        self
    }

    /// Sets the maximum number of results.
    pub fn limit(mut self, limit: u32) -> Self {
        self.size = limit;
        self
    }

    /// Appends a sort clause. Any configured default sort is discarded.
    pub fn sort(mut self, item: SortItem) -> Self {
        self.sort.push(item);
        self
    }

    /// Finishes the envelope.
    ///
    /// Fails with [`SearchError::MissingQuery`] when neither a query nor a
    /// post filter was set.
    pub fn build(self) -> Result<Dsl> {
        if self.query.is_none() && self.post_filter.is_none() {
            return Err(SearchError::MissingQuery);
        }
        let sort = if self.sort.is_empty() {
            self.default_sort
        } else {
            self.sort
        };
        tracing::debug!(
            from = self.from,
            size = self.size,
            query = ?self.query.as_ref().map(Query::kind),
            post_filter = ?self.post_filter.as_ref().map(Query::kind),
            sort = sort.len(),
            "built search dsl"
        );
        Ok(Dsl {
            from: self.from,
            size: self.size,
            post_filter: self.post_filter,
            query: self.query,
            sort,
        })
    }
}

/// The outer search request: an envelope plus the attributes to return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSearchRequest {
    dsl: Dsl,
    attributes: Vec<String>,
}

impl IndexSearchRequest {
    pub fn new<I>(dsl: Dsl, attributes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        IndexSearchRequest {
            dsl,
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a request for `query` using the defaults in `config`.
    pub fn from_config(query: impl Into<Query>, config: &SearchConfig) -> Result<Self> {
        let dsl = Dsl::builder_with(config).query(query).build()?;
        Ok(IndexSearchRequest::new(dsl, config.attributes.iter().cloned()))
    }

    pub fn dsl(&self) -> &Dsl {
        &self.dsl
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn to_document(&self) -> Value {
        json!({
            "dsl": self.dsl.to_document(),
            "attributes": self.attributes,
        })
    }

    /// Encodes the request body.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
