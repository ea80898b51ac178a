use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Semantic type of a stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "enum", rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Boolean,
    Timestamp,
    Uuid,
    /// Free-form JSON document.
    Json,
    /// Ordered list of strings (tags, image urls).
    TextArray,
    /// Reference to a registered enumeration, by name.
    Enum(&'static str),
}

impl ColumnType {
    pub const fn enum_name(self) -> Option<&'static str> {
        match self {
            Self::Enum(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Integer => f.write_str("integer"),
            Self::Real => f.write_str("real"),
            Self::Boolean => f.write_str("boolean"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::Uuid => f.write_str("uuid"),
            Self::Json => f.write_str("json"),
            Self::TextArray => f.write_str("text[]"),
            Self::Enum(name) => write!(f, "enum {name}"),
        }
    }
}

/// One column of a table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    /// The store assigns a value when an insert omits this column.
    pub has_default: bool,
}

/// Maps a Rust field type onto its column type.
///
/// `Option<T>` is the nullable form of `T`.
pub trait ColumnValue {
    const TYPE: ColumnType;
    const NULLABLE: bool = false;
}

macro_rules! column_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl ColumnValue for $ty {
                const TYPE: ColumnType = ColumnType::$variant;
            }
        )+
    };
}

column_value! {
    String => Text,
    i32 => Integer,
    i64 => Integer,
    f64 => Real,
    bool => Boolean,
    DateTime<Utc> => Timestamp,
    Uuid => Uuid,
    serde_json::Value => Json,
    Vec<String> => TextArray,
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    const TYPE: ColumnType = T::TYPE;
    const NULLABLE: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_is_nullable_form() {
        assert_eq!(<Option<String> as ColumnValue>::TYPE, ColumnType::Text);
        assert!(<Option<String> as ColumnValue>::NULLABLE);
        assert!(!<String as ColumnValue>::NULLABLE);
    }

    #[test]
    fn test_column_type_serializes_with_enum_name() {
        let json = serde_json::to_value(ColumnType::Enum("event_category")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "enum", "enum": "event_category" }));
        let json = serde_json::to_value(ColumnType::TextArray).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "text_array" }));
    }
}
