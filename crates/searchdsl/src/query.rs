//! The query tree and its operators.
//!
//! [`Query`] is the closed set of node kinds. The four operators are plain
//! methods that borrow their operands and return a new tree:
//!
//! | Method | Meaning |
//! |--------|---------|
//! | [`Query::and`] | both sides must hold |
//! | [`Query::or`] | either side must hold |
//! | [`Query::add`] | the right side is additionally mandatory (flattens into `must`) |
//! | [`Query::negate`] | the tree must not hold (De Morgan on `bool`) |
//!
//! `match_all` is the identity of AND/ADD and absorbs OR; `match_none` is the
//! identity of OR and absorbs AND/ADD. A `bool` operand on either side takes
//! over the combination so chains stay flat.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::compound::BoolQuery;
use crate::leaf::{Exists, MatchAll, Prefix, Range, Term, Terms};

/// A node of the query tree.
///
/// # Example
///
/// ```
/// use searchdsl::{Query, Term};
/// use serde_json::json;
///
/// let bob: Query = Term::new("name", "Bob").unwrap().into();
/// let dave: Query = Term::new("name", "Dave").unwrap().into();
///
/// assert_eq!(
///     bob.add(&dave).to_document(),
///     json!({"bool": {"must": [
///         {"term": {"name": {"value": "Bob"}}},
///         {"term": {"name": {"value": "Dave"}}}
///     ]}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Matches every document.
    MatchAll(MatchAll),
    /// Matches no document.
    MatchNone,
    /// Exact value match.
    Term(Term),
    /// Set membership.
    Terms(Terms),
    /// Bounded range.
    Range(Range),
    /// Field presence.
    Exists(Exists),
    /// String prefix.
    Prefix(Prefix),
    /// Compound query.
    Bool(BoolQuery),
}

impl Query {
    /// A query matching every document.
    pub fn match_all() -> Query {
        Query::MatchAll(MatchAll::new())
    }

    /// A query matching no document.
    pub fn match_none() -> Query {
        Query::MatchNone
    }

    /// Folds queries with [`Query::and`], starting from `match_all`.
    pub fn all<I>(queries: I) -> Query
    where
        I: IntoIterator,
        I::Item: Into<Query>,
    {
        queries
            .into_iter()
            .map(Into::into)
            .fold(Query::match_all(), |acc, q: Query| acc.and(&q))
    }

    /// Folds queries with [`Query::or`], starting from `match_none`.
    pub fn any<I>(queries: I) -> Query
    where
        I: IntoIterator,
        I::Item: Into<Query>,
    {
        queries
            .into_iter()
            .map(Into::into)
            .fold(Query::match_none(), |acc, q: Query| acc.or(&q))
    }

    /// Returns the wire name of this node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::MatchAll(_) => "match_all",
            Query::MatchNone => "match_none",
            Query::Term(_) => "term",
            Query::Terms(_) => "terms",
            Query::Range(_) => "range",
            Query::Exists(_) => "exists",
            Query::Prefix(_) => "prefix",
            Query::Bool(_) => "bool",
        }
    }

    /// Returns `true` for leaf predicates (anything that is not a group or
    /// one of the two constant queries).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Query::MatchAll(_) | Query::MatchNone | Query::Bool(_))
    }

    // ========================================================================
    // Operators
    // ========================================================================
    //
    // Each operator first lets the constant queries resolve (from either
    // side), then lets a `bool` operand take over, and only then falls back
    // to wrapping both sides in a new group.

    /// Combines two queries so that both must hold.
    pub fn and(&self, other: &Query) -> Query {
        match (self, other) {
            (Query::MatchAll(_), _) => other.clone(),
            (Query::MatchNone, _) => Query::MatchNone,
            (_, Query::MatchAll(_)) => self.clone(),
            (_, Query::MatchNone) => Query::MatchNone,
            (Query::Bool(b), _) => b.and(other),
            (_, Query::Bool(b)) => b.and(self),
            _ => BoolQuery::new()
                .with_must([self.clone(), other.clone()])
                .into(),
        }
    }

    /// Combines two queries so that at least one must hold.
    pub fn or(&self, other: &Query) -> Query {
        match (self, other) {
            (Query::MatchAll(_), _) => self.clone(),
            (Query::MatchNone, _) => other.clone(),
            (_, Query::MatchAll(_)) => other.clone(),
            (_, Query::MatchNone) => self.clone(),
            (Query::Bool(b), _) => b.or(other),
            (_, Query::Bool(b)) => b.or(self),
            _ => BoolQuery::new()
                .with_should([self.clone(), other.clone()])
                .into(),
        }
    }

    /// Adds `other` as an additional mandatory clause.
    ///
    /// Unlike [`Query::and`], merging two groups concatenates all four
    /// buckets without reinterpreting their optional clauses.
    pub fn add(&self, other: &Query) -> Query {
        match (self, other) {
            (Query::MatchAll(_), _) => other.clone(),
            (Query::MatchNone, _) => Query::MatchNone,
            (_, Query::MatchAll(_)) => self.clone(),
            (_, Query::MatchNone) => Query::MatchNone,
            (Query::Bool(b), _) => b.add(other),
            (_, Query::Bool(b)) => b.add(self),
            _ => BoolQuery::new()
                .with_must([self.clone(), other.clone()])
                .into(),
        }
    }

    /// Returns the negation of this query.
    pub fn negate(&self) -> Query {
        match self {
            Query::MatchAll(_) => Query::MatchNone,
            Query::MatchNone => Query::match_all(),
            Query::Bool(b) => b.negate(),
            leaf => BoolQuery::new().with_must_not([leaf.clone()]).into(),
        }
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serializes the tree to the backend's query document.
    pub fn to_document(&self) -> Value {
        match self {
            Query::MatchAll(q) => q.to_document(),
            Query::MatchNone => json!({ "match_none": {} }),
            Query::Term(q) => q.to_document(),
            Query::Terms(q) => q.to_document(),
            Query::Range(q) => q.to_document(),
            Query::Exists(q) => q.to_document(),
            Query::Prefix(q) => q.to_document(),
            Query::Bool(q) => q.to_document(),
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl From<MatchAll> for Query {
    fn from(q: MatchAll) -> Self {
        Query::MatchAll(q)
    }
}

impl From<Term> for Query {
    fn from(q: Term) -> Self {
        Query::Term(q)
    }
}

impl From<Terms> for Query {
    fn from(q: Terms) -> Self {
        Query::Terms(q)
    }
}

impl From<Range> for Query {
    fn from(q: Range) -> Self {
        Query::Range(q)
    }
}

impl From<Exists> for Query {
    fn from(q: Exists) -> Self {
        Query::Exists(q)
    }
}

impl From<Prefix> for Query {
    fn from(q: Prefix) -> Self {
        Query::Prefix(q)
    }
}
