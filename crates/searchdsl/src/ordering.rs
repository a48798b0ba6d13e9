//! Sort specifications for search requests.
//!
//! Provides [`SortOrder`] for direction and [`SortItem`] for field-based
//! ordering.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (smallest first).
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Descending order (largest first).
    #[serde(alias = "descending")]
    Desc,
}

impl SortOrder {
    /// Returns the wire name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sort clause: a field and a direction.
///
/// On the wire a sort item is `{field: {"order": "asc"}}`. When read from
/// configuration it uses the flat `{field, order}` form instead.
///
/// ```
/// use searchdsl::SortItem;
/// use serde_json::json;
///
/// assert_eq!(
///     SortItem::desc("name.keyword").to_document(),
///     json!({"name.keyword": {"order": "desc"}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SortItem {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub order: SortOrder,
}

impl SortItem {
    /// Creates a sort item with an explicit direction.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        SortItem {
            field: field.into(),
            order,
        }
    }

    /// Creates an ascending sort item.
    pub fn asc(field: impl Into<String>) -> Self {
        SortItem::new(field, SortOrder::Asc)
    }

    /// Creates a descending sort item.
    pub fn desc(field: impl Into<String>) -> Self {
        SortItem::new(field, SortOrder::Desc)
    }

    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            self.field.clone(),
            json!({ "order": self.order.as_str() }),
        );
        Value::Object(body)
    }
}

impl Serialize for SortItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_ascending() {
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        let item = SortItem {
            field: "name.keyword".into(),
            order: SortOrder::default(),
        };
        assert_eq!(
            item.to_document(),
            json!({"name.keyword": {"order": "asc"}})
        );
    }

    #[test]
    fn documents() {
        assert_eq!(
            SortItem::asc("name.keyword").to_document(),
            json!({"name.keyword": {"order": "asc"}})
        );
        assert_eq!(
            SortItem::desc("name.keyword").to_document(),
            json!({"name.keyword": {"order": "desc"}})
        );
    }

    #[test]
    fn display() {
        assert_eq!(SortOrder::Asc.to_string(), "asc");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn deserializes_flat_form() {
        let item: SortItem =
            serde_json::from_value(json!({"field": "__timestamp", "order": "descending"}))
                .unwrap();
        assert_eq!(item, SortItem::desc("__timestamp"));

        let item: SortItem = serde_json::from_value(json!({"field": "name"})).unwrap();
        assert_eq!(item.order, SortOrder::Asc);
    }
}
