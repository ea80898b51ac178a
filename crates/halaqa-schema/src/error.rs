use thiserror::Error;

use crate::column::ColumnType;

/// Contract violations: unknown names, or payloads the store must refuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("unknown enumeration `{0}`")]
    UnknownEnum(String),

    #[error("table `{table}` has no column `{column}`")]
    UnknownColumn { table: &'static str, column: String },

    #[error("`{value}` is not a legal `{enum_name}` value")]
    InvalidEnumValue { enum_name: &'static str, value: String },

    #[error("column `{table}.{column}` is required")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("column `{table}.{column}` does not accept null")]
    NullViolation { table: &'static str, column: &'static str },

    #[error("column `{table}.{column}` expects {expected}")]
    TypeMismatch {
        table: &'static str,
        column: &'static str,
        expected: ColumnType,
    },

    #[error("column `{table}.{column}` references unregistered enumeration `{enum_name}`")]
    UnregisteredEnum {
        table: &'static str,
        column: &'static str,
        enum_name: &'static str,
    },

    #[error("relationship `{table}.{column}` points at missing `{target}`")]
    DanglingRelationship {
        table: &'static str,
        column: &'static str,
        target: String,
    },
}
