//! JSON values to SQLite values and back, guided by the column type.

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use halaqa_schema::{Column, ColumnType};
use rusqlite::types::{Value as SqlValue, ValueRef};
use serde_json::Value;
use uuid::Uuid;

/// Fixed-width RFC 3339 so stored timestamps sort as text.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Uuids are stored hyphenated and lowercase, whatever form they arrived in.
/// Text that is not a uuid is left alone so lookups simply miss.
pub fn canonical_key(key: &str) -> String {
    match key.parse::<Uuid>() {
        Ok(id) => id.to_string(),
        Err(_) => key.to_owned(),
    }
}

pub fn to_sql(column: &Column, value: &Value) -> Result<SqlValue> {
    if value.is_null() {
        return Ok(SqlValue::Null);
    }

    let converted = match column.ty {
        ColumnType::Text | ColumnType::Enum(_) => value.as_str().map(|s| SqlValue::Text(s.to_owned())),
        ColumnType::Uuid => value.as_str().map(canonical_key).map(SqlValue::Text),
        ColumnType::Timestamp => value
            .as_str()
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            .map(|at| SqlValue::Text(format_timestamp(at))),
        ColumnType::Integer => value.as_i64().map(SqlValue::Integer),
        ColumnType::Real => value.as_f64().map(SqlValue::Real),
        ColumnType::Boolean => value.as_bool().map(|b| SqlValue::Integer(i64::from(b))),
        ColumnType::Json | ColumnType::TextArray => Some(SqlValue::Text(value.to_string())),
    };

    converted.ok_or_else(|| anyhow!("Column `{}` cannot store {}", column.name, value))
}

pub fn from_sql(column: &Column, value: ValueRef<'_>) -> Result<Value> {
    let json = match (column.ty, value) {
        (_, ValueRef::Null) => Value::Null,
        (ColumnType::Boolean, ValueRef::Integer(i)) => Value::Bool(i != 0),
        (ColumnType::Integer, ValueRef::Integer(i)) => Value::from(i),
        (ColumnType::Real, ValueRef::Real(f)) => Value::from(f),
        (ColumnType::Real, ValueRef::Integer(i)) => Value::from(i as f64),
        (ColumnType::Json | ColumnType::TextArray, ValueRef::Text(bytes)) => {
            serde_json::from_slice(bytes)?
        }
        (_, ValueRef::Text(bytes)) => Value::String(std::str::from_utf8(bytes)?.to_owned()),
        (_, other) => bail!(
            "Column `{}` holds unexpected {:?}",
            column.name,
            other.data_type()
        ),
    };
    Ok(json)
}
