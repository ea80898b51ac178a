use serde::{Deserialize, Deserializer, Serialize};

use crate::column::{Column, ColumnType};
use crate::table::TableDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// A stored row: every column present, nullable ones may be null.
    Row,
    /// Columns with a store default may be omitted.
    Insert,
    /// Partial patch: every column may be omitted.
    Update,
}

impl ShapeKind {
    pub const fn requires(self, column: &Column) -> bool {
        match self {
            Self::Row => true,
            Self::Insert => !column.has_default,
            Self::Update => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldShape {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub required: bool,
}

/// Field-level view of one of a table's three shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordShape {
    pub table: &'static str,
    pub kind: ShapeKind,
    pub fields: Vec<FieldShape>,
}

impl RecordShape {
    pub fn derive(table: &TableDef, kind: ShapeKind) -> Self {
        let fields = table
            .columns
            .iter()
            .map(|column| FieldShape {
                name: column.name,
                ty: column.ty,
                nullable: column.nullable,
                required: kind.requires(column),
            })
            .collect();

        Self {
            table: table.name,
            kind,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| !f.required).map(|f| f.name)
    }
}

/// Deserializes a present field as `Some`, so an explicit `null` on an
/// `Option<Option<T>>` patch field means "set to null" rather than "unset".
pub fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
