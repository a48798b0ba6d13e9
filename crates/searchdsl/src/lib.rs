//! searchdsl - Composable boolean query algebra for search-engine query DSLs.
//!
//! searchdsl builds structured search requests from small pieces. It provides:
//!
//! - Leaf predicates: exact term, term set, range, existence, prefix
//! - A compound `bool` query with `must`, `should`, `must_not` and `filter`
//! - Operators (`and`, `or`, `add`, `negate`) that keep the tree flat
//! - Request envelopes with pagination, sorting and result attributes
//! - Serialization to the JSON document the search backend consumes
//!
//! # Quick Start
//!
//! ```rust
//! use searchdsl::{Dsl, IndexSearchRequest, Query, Range, Term};
//! use serde_json::json;
//!
//! let schema: Query = Term::new("__typeName.keyword", "Schema").unwrap().into();
//! let recent: Query = Range::new("__timestamp")
//!     .and_then(|r| r.gte(1_700_000_000_000i64))
//!     .unwrap()
//!     .into();
//! let deleted: Query = Term::new("__state", "DELETED").unwrap().into();
//!
//! let query = schema.and(&recent).and(&deleted.negate());
//!
//! let dsl = Dsl::builder().query(query).limit(20).build().unwrap();
//! let request = IndexSearchRequest::new(dsl, ["name", "qualifiedName"]);
//!
//! assert_eq!(
//!     request.to_document(),
//!     json!({
//!         "dsl": {
//!             "from": 0,
//!             "size": 20,
//!             "query": {"bool": {
//!                 "must": [
//!                     {"term": {"__typeName.keyword": {"value": "Schema"}}},
//!                     {"range": {"__timestamp": {"gte": 1_700_000_000_000i64}}}
//!                 ],
//!                 "must_not": [{"term": {"__state": {"value": "DELETED"}}}]
//!             }}
//!         },
//!         "attributes": ["name", "qualifiedName"]
//!     })
//! );
//! ```
//!
//! # Operator Semantics
//!
//! | Operation | Result |
//! |-----------|--------|
//! | `a.and(b)` / `a.add(b)` on leaves | `bool { must: [a, b] }` |
//! | `a.or(b)` on leaves | `bool { should: [a, b] }` |
//! | `a.negate()` on a leaf | `bool { must_not: [a] }` |
//! | `match_all` with AND/ADD | the other operand |
//! | `match_none` with OR | the other operand |
//! | `negate` on a `bool` | De Morgan: `should` of the negated mandatory clauses |
//!
//! Operators borrow their operands and always return a new tree, so shared
//! sub-queries can be reused across any number of combinations.
//!
//! # Minimum Should Match
//!
//! When a `bool` query has no explicit `minimum_should_match`, the effective
//! value is derived: optional clauses gate matching only when there are no
//! `must` or `filter` clauses. The derived value is never serialized; an
//! explicit value always is.

mod attribute;
mod compound;
mod config;
mod error;
mod leaf;
mod ordering;
mod query;
mod request;
mod value;

// Re-export public API
pub use attribute::{Attribute, AttributeKind, EntityState};
pub use compound::BoolQuery;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use leaf::{Exists, MatchAll, Prefix, Range, RangeRelation, Term, Terms};
pub use ordering::{SortItem, SortOrder};
pub use query::Query;
pub use request::{Dsl, DslBuilder, IndexSearchRequest, DEFAULT_PAGE_SIZE};
pub use value::{FieldValue, Number, Timestamp};
