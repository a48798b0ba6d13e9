//! The compound `bool` query.
//!
//! A [`BoolQuery`] groups clauses into four buckets:
//!
//! - **must**: every clause must match
//! - **should**: optional clauses; at least `minimum_should_match` must match
//! - **must_not**: no clause may match
//! - **filter**: every clause must match (no scoring contribution)
//!
//! The combination and negation rules here are what keep chains of
//! operators flat instead of nesting a new `bool` at every step.

use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::leaf::check_boost;
use crate::query::Query;

/// A compound query over four clause buckets.
///
/// `minimum_should_match` is kept as an explicit `Option`: an unset value is
/// derived on demand (see [`effective_minimum_should_match`]) and never
/// written to the wire, while an explicit value is always written, even `0`.
///
/// [`effective_minimum_should_match`]: BoolQuery::effective_minimum_should_match
///
/// ```
/// use searchdsl::{BoolQuery, Term};
/// use serde_json::json;
///
/// let q = BoolQuery::new()
///     .with_must([Term::new("name", "Bob").unwrap()])
///     .with_minimum_should_match(3);
/// assert_eq!(
///     q.to_document(),
///     json!({"bool": {"must": [{"term": {"name": {"value": "Bob"}}}], "minimum_should_match": 3}})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    must: Vec<Query>,
    should: Vec<Query>,
    must_not: Vec<Query>,
    filter: Vec<Query>,
    boost: Option<f64>,
    minimum_should_match: Option<u32>,
}

impl BoolQuery {
    /// Creates an empty bool query.
    pub fn new() -> Self {
        BoolQuery::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Appends clauses to the `must` bucket.
    pub fn with_must<I>(mut self, clauses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Query>,
    {
        self.must.extend(clauses.into_iter().map(Into::into));
        self
    }

    /// Appends clauses to the `should` bucket.
    pub fn with_should<I>(mut self, clauses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Query>,
    {
        self.should.extend(clauses.into_iter().map(Into::into));
        self
    }

    /// Appends clauses to the `must_not` bucket.
    pub fn with_must_not<I>(mut self, clauses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Query>,
    {
        self.must_not.extend(clauses.into_iter().map(Into::into));
        self
    }

    /// Appends clauses to the `filter` bucket.
    pub fn with_filter<I>(mut self, clauses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Query>,
    {
        self.filter.extend(clauses.into_iter().map(Into::into));
        self
    }

    /// Sets the boost.
    pub fn with_boost(mut self, boost: f64) -> Result<Self> {
        self.boost = Some(check_boost(boost)?);
        Ok(self)
    }

    /// Sets an explicit minimum number of `should` clauses that must match.
    pub fn with_minimum_should_match(mut self, minimum: u32) -> Self {
        self.minimum_should_match = Some(minimum);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn must(&self) -> &[Query] {
        &self.must
    }

    pub fn should(&self) -> &[Query] {
        &self.should
    }

    pub fn must_not(&self) -> &[Query] {
        &self.must_not
    }

    pub fn filter(&self) -> &[Query] {
        &self.filter
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }

    /// Returns the explicitly set minimum, if any.
    pub fn minimum_should_match(&self) -> Option<u32> {
        self.minimum_should_match
    }

    /// Returns the number of `should` clauses that must match.
    ///
    /// An explicit minimum always wins, even `0`. Otherwise it is derived:
    /// optional clauses only gate matching when there is nothing mandatory,
    /// so it is 0 when `should` is empty or `must`/`filter` is non-empty,
    /// and 1 otherwise.
    pub fn effective_minimum_should_match(&self) -> u32 {
        match self.minimum_should_match {
            Some(minimum) => minimum,
            None if self.should.is_empty() => 0,
            None if !self.must.is_empty() || !self.filter.is_empty() => 0,
            None => 1,
        }
    }

    /// Returns `true` if all four buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
    }

    /// Returns `true` for a group made only of optional clauses: no
    /// `must`, `must_not` or `filter` clauses and no explicit minimum.
    pub fn is_pure_should(&self) -> bool {
        self.must.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
            && self.minimum_should_match.is_none()
    }

    // ========================================================================
    // Combination
    // ========================================================================
    //
    // These are reached through `Query`, which has already resolved the
    // match_all / match_none operands. `other` is never one of those.

    /// ADD: everything in `other` becomes additionally mandatory.
    pub(crate) fn add(&self, other: &Query) -> Query {
        let mut q = self.clone();
        match other {
            Query::Bool(o) => {
                q.must.extend(o.must.iter().cloned());
                q.should.extend(o.should.iter().cloned());
                q.must_not.extend(o.must_not.iter().cloned());
                q.filter.extend(o.filter.iter().cloned());
            }
            _ => q.must.push(other.clone()),
        }
        Query::Bool(q)
    }

    /// AND: both sides must hold, with each side's optional clauses keeping
    /// their effective minimum.
    pub(crate) fn and(&self, other: &Query) -> Query {
        let mut q = self.clone();

        let Query::Bool(o) = other else {
            // Once a mandatory clause is added the derived minimum would drop
            // to 0, so pin it to keep the optional clauses load-bearing.
            if q.must.is_empty() && q.filter.is_empty() && !q.should.is_empty() {
                q.minimum_should_match.get_or_insert(1);
            }
            q.must.push(other.clone());
            return Query::Bool(q);
        };

        q.must.extend(o.must.iter().cloned());
        q.must_not.extend(o.must_not.iter().cloned());
        q.filter.extend(o.filter.iter().cloned());
        q.should = Vec::new();
        q.minimum_should_match = None;

        for operand in [self, o] {
            let minimum = operand.effective_minimum_should_match();
            if operand.should.len() <= minimum as usize {
                // every optional clause is required
                q.must.extend(operand.should.iter().cloned());
            } else if q.should.is_empty() {
                q.minimum_should_match = Some(minimum);
                q.should = operand.should.clone();
            } else if q.effective_minimum_should_match() == 0 && minimum == 0 {
                q.should.extend(operand.should.iter().cloned());
            } else {
                q.must.push(Query::Bool(BoolQuery {
                    should: operand.should.clone(),
                    minimum_should_match: Some(minimum),
                    ..BoolQuery::default()
                }));
            }
        }

        tracing::trace!(
            must = q.must.len(),
            should = q.should.len(),
            minimum_should_match = ?q.minimum_should_match,
            "merged bool queries under and"
        );
        Query::Bool(q)
    }

    /// OR: pure optional groups absorb the other operand into `should`;
    /// anything else is wrapped in a new group.
    pub(crate) fn or(&self, other: &Query) -> Query {
        if self.is_pure_should() {
            return self.absorb_should(other);
        }
        if let Query::Bool(o) = other {
            if o.is_pure_should() {
                return o.absorb_should(&Query::Bool(self.clone()));
            }
        }
        Query::Bool(BoolQuery {
            should: vec![Query::Bool(self.clone()), other.clone()],
            ..BoolQuery::default()
        })
    }

    fn absorb_should(&self, other: &Query) -> Query {
        let mut q = self.clone();
        match other {
            Query::Bool(o) if o.is_pure_should() => q.should.extend(o.should.iter().cloned()),
            _ => q.should.push(other.clone()),
        }
        Query::Bool(q)
    }

    /// NOT via De Morgan: the negation of "all of these" is "any of their
    /// negations".
    pub(crate) fn negate(&self) -> Query {
        // an empty group matches everything
        if self.is_empty() {
            return Query::MatchNone;
        }

        let mut negations: Vec<Query> = self
            .must
            .iter()
            .chain(&self.filter)
            .map(Query::negate)
            .collect();
        negations.extend(self.must_not.iter().cloned());

        if !self.should.is_empty() && self.effective_minimum_should_match() > 0 {
            negations.push(Query::Bool(BoolQuery {
                must_not: self.should.clone(),
                ..BoolQuery::default()
            }));
        }

        tracing::trace!(clauses = negations.len(), "negated bool query");

        match negations.len() {
            // only non-gating optional clauses: the group matches everything
            0 => Query::MatchNone,
            1 => negations.swap_remove(0),
            _ => Query::Bool(BoolQuery {
                should: negations,
                ..BoolQuery::default()
            }),
        }
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    pub fn to_document(&self) -> Value {
        let mut clauses = Map::new();
        for (name, bucket) in [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
            ("filter", &self.filter),
        ] {
            if !bucket.is_empty() {
                let docs = bucket.iter().map(Query::to_document).collect();
                clauses.insert(name.into(), Value::Array(docs));
            }
        }
        if let Some(boost) = self.boost {
            clauses.insert("boost".into(), json!(boost));
        }
        if let Some(minimum) = self.minimum_should_match {
            clauses.insert("minimum_should_match".into(), json!(minimum));
        }
        json!({ "bool": clauses })
    }
}

impl From<BoolQuery> for Query {
    fn from(q: BoolQuery) -> Self {
        Query::Bool(q)
    }
}
