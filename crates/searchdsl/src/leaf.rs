//! Leaf predicates.
//!
//! A leaf tests a single field against a condition. Leaves are validated when
//! built and immutable afterwards; they know nothing about combination, which
//! is handled by [`Query`](crate::Query).

use serde_json::{json, Map, Value};

use crate::error::{Result, SearchError};
use crate::value::FieldValue;

fn require_field(kind: &'static str, field: impl Into<String>) -> Result<String> {
    let field = field.into();
    if field.trim().is_empty() {
        return Err(SearchError::EmptyField { kind });
    }
    Ok(field)
}

fn check_value(kind: &'static str, field: &str, value: FieldValue) -> Result<FieldValue> {
    match value.as_number() {
        Some(n) if !n.is_finite() => Err(SearchError::NonFiniteValue {
            kind,
            field: field.to_string(),
        }),
        _ => Ok(value),
    }
}

pub(crate) fn check_boost(boost: f64) -> Result<f64> {
    if boost.is_finite() && boost >= 0.0 {
        Ok(boost)
    } else {
        Err(SearchError::InvalidBoost(boost))
    }
}

/// Matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchAll {
    boost: Option<f64>,
}

impl MatchAll {
    /// Creates a match-all query without boost.
    pub fn new() -> Self {
        MatchAll::default()
    }

    /// Sets the boost applied to every match.
    pub fn with_boost(mut self, boost: f64) -> Result<Self> {
        self.boost = Some(check_boost(boost)?);
        Ok(self)
    }

    /// Returns the boost, if set.
    pub fn boost(&self) -> Option<f64> {
        self.boost
    }

    pub fn to_document(&self) -> Value {
        let mut params = Map::new();
        if let Some(boost) = self.boost {
            params.insert("boost".into(), json!(boost));
        }
        json!({ "match_all": params })
    }
}

/// Exact match of a field against a single value.
///
/// ```
/// use searchdsl::Term;
/// use serde_json::json;
///
/// let term = Term::new("name", "Bob").unwrap().case_insensitive(true);
/// assert_eq!(
///     term.to_document(),
///     json!({"term": {"name": {"value": "Bob", "case_insensitive": true}}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    field: String,
    value: FieldValue,
    boost: Option<f64>,
    case_insensitive: Option<bool>,
}

impl Term {
    /// Creates a term query. Fails if `field` is empty or the value is a
    /// non-finite number.
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Result<Self> {
        let field = require_field("term", field)?;
        let value = check_value("term", &field, value.into())?;
        Ok(Term {
            field,
            value,
            boost: None,
            case_insensitive: None,
        })
    }

    /// Sets the boost.
    pub fn with_boost(mut self, boost: f64) -> Result<Self> {
        self.boost = Some(check_boost(boost)?);
        Ok(self)
    }

    /// Sets whether the match ignores ASCII case.
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = Some(case_insensitive);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }

    pub fn is_case_insensitive(&self) -> Option<bool> {
        self.case_insensitive
    }

    pub fn to_document(&self) -> Value {
        value_document(
            "term",
            &self.field,
            json!(self.value),
            self.case_insensitive,
            self.boost,
        )
    }
}

/// Matches fields that start with a string prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    field: String,
    value: String,
    boost: Option<f64>,
    case_insensitive: Option<bool>,
}

impl Prefix {
    /// Creates a prefix query. Fails if `field` is empty.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Ok(Prefix {
            field: require_field("prefix", field)?,
            value: value.into(),
            boost: None,
            case_insensitive: None,
        })
    }

    /// Sets the boost.
    pub fn with_boost(mut self, boost: f64) -> Result<Self> {
        self.boost = Some(check_boost(boost)?);
        Ok(self)
    }

    /// Sets whether the match ignores ASCII case.
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = Some(case_insensitive);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }

    pub fn is_case_insensitive(&self) -> Option<bool> {
        self.case_insensitive
    }

    pub fn to_document(&self) -> Value {
        value_document(
            "prefix",
            &self.field,
            json!(self.value),
            self.case_insensitive,
            self.boost,
        )
    }
}

// Term and prefix share the `{kind: {field: {value, case_insensitive, boost}}}` shape.
fn value_document(
    kind: &str,
    field: &str,
    value: Value,
    case_insensitive: Option<bool>,
    boost: Option<f64>,
) -> Value {
    let mut params = Map::new();
    params.insert("value".into(), value);
    if let Some(ci) = case_insensitive {
        params.insert("case_insensitive".into(), json!(ci));
    }
    if let Some(boost) = boost {
        params.insert("boost".into(), json!(boost));
    }
    let mut body = Map::new();
    body.insert(field.to_string(), Value::Object(params));
    json!({ kind: body })
}

/// Matches a field against any of a set of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Terms {
    field: String,
    values: Vec<FieldValue>,
    boost: Option<f64>,
}

impl Terms {
    /// Creates a terms query.
    ///
    /// Fails if `field` is empty or `boost`, if no values are given, if the
    /// values are not all of the same kind, or if one is a non-finite number.
    pub fn new<I, V>(field: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        let field = require_field("terms", field)?;
        // the field shares its map with the boost parameter
        if field == "boost" {
            return Err(SearchError::ReservedField { field });
        }
        let values = values
            .into_iter()
            .map(|v| check_value("terms", &field, v.into()))
            .collect::<Result<Vec<_>>>()?;
        let Some(first) = values.first() else {
            return Err(SearchError::EmptyTerms { field });
        };
        if let Some(other) = values.iter().find(|v| v.kind() != first.kind()) {
            return Err(SearchError::MixedTermTypes {
                first: first.kind(),
                other: other.kind(),
                field,
            });
        }
        Ok(Terms {
            field,
            values,
            boost: None,
        })
    }

    /// Sets the boost.
    pub fn with_boost(mut self, boost: f64) -> Result<Self> {
        self.boost = Some(check_boost(boost)?);
        Ok(self)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }

    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert(self.field.clone(), json!(self.values));
        if let Some(boost) = self.boost {
            body.insert("boost".into(), json!(boost));
        }
        json!({ "terms": body })
    }
}

/// How a range query treats range-typed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeRelation {
    /// The field range intersects the query range.
    #[default]
    Intersects,
    /// The field range fully contains the query range.
    Contains,
    /// The field range lies within the query range.
    Within,
}

impl RangeRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeRelation::Intersects => "INTERSECTS",
            RangeRelation::Contains => "CONTAINS",
            RangeRelation::Within => "WITHIN",
        }
    }
}

impl std::fmt::Display for RangeRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches a field against lower and/or upper bounds.
///
/// A range with no bounds at all is legal and serializes to an empty object.
///
/// ```
/// use searchdsl::Range;
/// use serde_json::json;
///
/// let range = Range::new("size").unwrap().gte(10).unwrap().lt(20).unwrap();
/// assert_eq!(range.to_document(), json!({"range": {"size": {"gte": 10, "lt": 20}}}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    field: String,
    gt: Option<FieldValue>,
    gte: Option<FieldValue>,
    lt: Option<FieldValue>,
    lte: Option<FieldValue>,
    boost: Option<f64>,
    format: Option<String>,
    relation: Option<RangeRelation>,
    time_zone: Option<String>,
}

impl Range {
    /// Creates an unbounded range query. Fails if `field` is empty.
    pub fn new(field: impl Into<String>) -> Result<Self> {
        Ok(Range {
            field: require_field("range", field)?,
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            boost: None,
            format: None,
            relation: None,
            time_zone: None,
        })
    }

    pub fn gt(mut self, value: impl Into<FieldValue>) -> Result<Self> {
        self.gt = Some(check_value("range", &self.field, value.into())?);
        Ok(self)
    }

    pub fn gte(mut self, value: impl Into<FieldValue>) -> Result<Self> {
        self.gte = Some(check_value("range", &self.field, value.into())?);
        Ok(self)
    }

    pub fn lt(mut self, value: impl Into<FieldValue>) -> Result<Self> {
        self.lt = Some(check_value("range", &self.field, value.into())?);
        Ok(self)
    }

    pub fn lte(mut self, value: impl Into<FieldValue>) -> Result<Self> {
        self.lte = Some(check_value("range", &self.field, value.into())?);
        Ok(self)
    }

    /// Sets the boost.
    pub fn with_boost(mut self, boost: f64) -> Result<Self> {
        self.boost = Some(check_boost(boost)?);
        Ok(self)
    }

    /// Sets the date format used to parse string bounds.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn relation(mut self, relation: RangeRelation) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Sets the UTC offset or IANA zone applied to date bounds.
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the bounds as `(gt, gte, lt, lte)`.
    pub fn bounds(
        &self,
    ) -> (
        Option<&FieldValue>,
        Option<&FieldValue>,
        Option<&FieldValue>,
        Option<&FieldValue>,
    ) {
        (
            self.gt.as_ref(),
            self.gte.as_ref(),
            self.lt.as_ref(),
            self.lte.as_ref(),
        )
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }

    pub fn to_document(&self) -> Value {
        let mut params = Map::new();
        for (key, bound) in [
            ("gt", &self.gt),
            ("gte", &self.gte),
            ("lt", &self.lt),
            ("lte", &self.lte),
        ] {
            if let Some(bound) = bound {
                params.insert(key.into(), json!(bound));
            }
        }
        if let Some(boost) = self.boost {
            params.insert("boost".into(), json!(boost));
        }
        if let Some(format) = &self.format {
            params.insert("format".into(), json!(format));
        }
        if let Some(relation) = self.relation {
            params.insert("relation".into(), json!(relation.as_str()));
        }
        if let Some(tz) = &self.time_zone {
            params.insert("time_zone".into(), json!(tz));
        }
        let mut body = Map::new();
        body.insert(self.field.clone(), Value::Object(params));
        json!({ "range": body })
    }
}

/// Matches documents where a field holds any indexed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exists {
    field: String,
}

impl Exists {
    /// Creates an existence query. Fails if `field` is empty.
    pub fn new(field: impl Into<String>) -> Result<Self> {
        Ok(Exists {
            field: require_field("exists", field)?,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn to_document(&self) -> Value {
        json!({ "exists": { "field": self.field } })
    }
}
