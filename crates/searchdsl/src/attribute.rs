//! Well-known index attributes.
//!
//! Every entity in the search index carries a handful of system attributes
//! under fixed field names. [`Attribute`] names them once, together with the
//! kind of value each holds, so predicates on them can be checked when they
//! are built instead of failing on the backend.

use crate::error::{Result, SearchError};
use crate::leaf::{Exists, Prefix, Term};
use crate::value::FieldValue;

/// The kind of value a well-known attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Free text.
    Text,
    /// Epoch-millisecond date.
    Timestamp,
    /// Entity lifecycle state, see [`EntityState`].
    State,
}

impl AttributeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Text => "string",
            AttributeKind::Timestamp => "timestamp",
            AttributeKind::State => "entity state",
        }
    }
}

/// Lifecycle state stored in [`Attribute::State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityState {
    Active,
    Deleted,
}

impl EntityState {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityState::Active => "ACTIVE",
            EntityState::Deleted => "DELETED",
        }
    }

    /// Parses the wire name of a state.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(EntityState::Active),
            "DELETED" => Some(EntityState::Deleted),
            _ => None,
        }
    }
}

impl From<EntityState> for FieldValue {
    fn from(state: EntityState) -> Self {
        FieldValue::String(state.as_str().to_string())
    }
}

/// System attributes present on every indexed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Guid,
    TypeName,
    State,
    CreatedBy,
    ModifiedBy,
    CreateTime,
    UpdateTime,
    QualifiedName,
    Name,
    SuperTypeNames,
    TraitNames,
    PropagatedTraitNames,
}

impl Attribute {
    /// All well-known attributes.
    pub const ALL: [Attribute; 12] = [
        Attribute::Guid,
        Attribute::TypeName,
        Attribute::State,
        Attribute::CreatedBy,
        Attribute::ModifiedBy,
        Attribute::CreateTime,
        Attribute::UpdateTime,
        Attribute::QualifiedName,
        Attribute::Name,
        Attribute::SuperTypeNames,
        Attribute::TraitNames,
        Attribute::PropagatedTraitNames,
    ];

    /// Returns the index field name.
    pub fn field(self) -> &'static str {
        match self {
            Attribute::Guid => "__guid",
            Attribute::TypeName => "__typeName.keyword",
            Attribute::State => "__state",
            Attribute::CreatedBy => "__createdBy",
            Attribute::ModifiedBy => "__modifiedBy",
            Attribute::CreateTime => "__timestamp",
            Attribute::UpdateTime => "__modificationTimestamp",
            Attribute::QualifiedName => "qualifiedName",
            Attribute::Name => "name.keyword",
            Attribute::SuperTypeNames => "__superTypeNames.keyword",
            Attribute::TraitNames => "__traitNames",
            Attribute::PropagatedTraitNames => "__propagatedTraitNames",
        }
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::CreateTime | Attribute::UpdateTime => AttributeKind::Timestamp,
            Attribute::State => AttributeKind::State,
            _ => AttributeKind::Text,
        }
    }

    fn check(self, value: &FieldValue) -> Result<()> {
        let ok = match (self.kind(), value) {
            (AttributeKind::Text, FieldValue::String(_)) => true,
            (AttributeKind::Timestamp, FieldValue::Timestamp(_)) => true,
            (AttributeKind::State, FieldValue::String(s)) => EntityState::parse(s).is_some(),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    fn mismatch(self) -> SearchError {
        SearchError::AttributeKindMismatch {
            attribute: self.field(),
            expected: self.kind().as_str(),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

impl Term {
    /// Creates a term query on a well-known attribute, checking that the
    /// value fits the attribute's kind.
    ///
    /// ```
    /// use searchdsl::{Attribute, EntityState, Term};
    ///
    /// let active = Term::with_attribute(Attribute::State, EntityState::Active).unwrap();
    /// assert_eq!(active.field(), "__state");
    /// assert!(Term::with_attribute(Attribute::State, "GONE").is_err());
    /// ```
    pub fn with_attribute(attribute: Attribute, value: impl Into<FieldValue>) -> Result<Term> {
        let value = value.into();
        attribute.check(&value)?;
        Term::new(attribute.field(), value)
    }
}

impl Prefix {
    /// Creates a prefix query on a well-known attribute.
    ///
    /// Timestamp attributes cannot be prefix-matched.
    pub fn with_attribute(attribute: Attribute, value: impl Into<String>) -> Result<Prefix> {
        let value = value.into();
        attribute.check(&FieldValue::String(value.clone()))?;
        Prefix::new(attribute.field(), value)
    }
}

impl Exists {
    /// Creates an existence query on a well-known attribute.
    pub fn with_attribute(attribute: Attribute) -> Result<Exists> {
        Exists::new(attribute.field())
    }
}
