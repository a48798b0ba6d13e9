//! Owned field values carried by leaf predicates.
//!
//! [`FieldValue`] is what a predicate compares a field against. It owns its
//! data so queries can be cloned and combined freely, and it serializes to
//! the plain JSON scalar the backend expects.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Serialize, Serializer};

/// A value compared against a document field.
///
/// # Example
///
/// ```
/// use searchdsl::{FieldValue, Number, Timestamp};
///
/// assert_eq!(FieldValue::from("Bob"), FieldValue::String("Bob".into()));
/// assert_eq!(FieldValue::from(3i32), FieldValue::Number(Number::I64(3)));
/// assert_eq!(FieldValue::from(Timestamp(1000)).kind(), "timestamp");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
}

impl FieldValue {
    /// Returns the name of this value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Number(_) => "number",
            FieldValue::Bool(_) => "bool",
            FieldValue::Timestamp(_) => "timestamp",
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Number(n) => n.serialize(serializer),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Timestamp(t) => serializer.serialize_i64(t.as_millis()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Timestamp> for FieldValue {
    fn from(t: Timestamp) -> Self {
        FieldValue::Timestamp(t)
    }
}

impl From<SystemTime> for FieldValue {
    fn from(t: SystemTime) -> Self {
        FieldValue::Timestamp(Timestamp::from(t))
    }
}

/// Numeric value, stored in one of three variants to preserve precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `false` for NaN and infinite floats.
    pub fn is_finite(self) -> bool {
        match self {
            Number::F64(n) => n.is_finite(),
            _ => true,
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::I64(n) => serializer.serialize_i64(n),
            Number::U64(n) => serializer.serialize_u64(n),
            Number::F64(n) => serializer.serialize_f64(n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty; $($src:ty),*) => {
        $(
            impl From<$src> for Number {
                fn from(n: $src) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$src> for FieldValue {
                fn from(n: $src) -> Self {
                    FieldValue::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(I64, i64; i8, i16, i32, i64, isize);
number_from!(U64, u64; u8, u16, u32, u64, usize);
number_from!(F64, f64; f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// Date fields are indexed as epoch milliseconds, so this is also the wire
/// representation.
///
/// ```
/// use searchdsl::Timestamp;
///
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// assert!(Timestamp(1000) < Timestamp(2000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch, saturating at
    /// the representable range.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the current time.
    pub fn now() -> Self {
        Timestamp::from(SystemTime::now())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(after) => Timestamp(after.as_millis() as i64),
            Err(before) => Timestamp(-(before.duration().as_millis() as i64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(FieldValue::from("a").kind(), "string");
        assert_eq!(FieldValue::from(1u8).kind(), "number");
        assert_eq!(FieldValue::from(true).kind(), "bool");
        assert_eq!(FieldValue::from(Timestamp(0)).kind(), "timestamp");
    }

    #[test]
    fn extractors() {
        assert_eq!(FieldValue::from("hello").as_str(), Some("hello"));
        assert_eq!(FieldValue::from(42i64).as_number(), Some(Number::I64(42)));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(
            FieldValue::from(Timestamp(7)).as_timestamp(),
            Some(Timestamp(7))
        );
        assert_eq!(FieldValue::from("x").as_number(), None);
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
        assert_eq!(Number::U64(3).to_f64(), 3.0);
    }

    #[test]
    fn serializes_as_plain_scalars() {
        let values = vec![
            FieldValue::from("dave"),
            FieldValue::from(-3i64),
            FieldValue::from(7u64),
            FieldValue::from(1.5f64),
            FieldValue::from(false),
            FieldValue::from(Timestamp(1_700_000_000_123)),
        ];
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!(["dave", -3, 7, 1.5, false, 1_700_000_000_123i64])
        );
    }

    #[test]
    fn finite_numbers() {
        assert!(Number::from(1.5f64).is_finite());
        assert!(Number::from(u64::MAX).is_finite());
        assert!(!Number::from(f64::NAN).is_finite());
        assert!(!Number::from(f32::NEG_INFINITY).is_finite());
    }

    #[test]
    fn from_secs_saturates() {
        assert_eq!(Timestamp::from_secs(-3).as_millis(), -3000);
        assert_eq!(Timestamp::from_secs(i64::MAX), Timestamp(i64::MAX));
        assert_eq!(Timestamp::from_secs(i64::MIN), Timestamp(i64::MIN));
    }

    #[test]
    fn system_time_becomes_epoch_millis() {
        let t = UNIX_EPOCH + Duration::from_millis(1_234);
        assert_eq!(Timestamp::from(t), Timestamp(1_234));

        let before = UNIX_EPOCH - Duration::from_millis(500);
        assert_eq!(Timestamp::from(before), Timestamp(-500));
    }
}
