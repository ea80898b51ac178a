//! Schema contract for the halaqa store.
//!
//! One canonical row definition per table (see [`table!`]) yields the row,
//! insert and update shapes plus a [`TableDef`] describing columns and
//! foreign keys. Closed enumerations are declared with [`enum_tags!`]. A
//! [`Schema`] registry answers lookups by name for callers that only hold a
//! table or enum name at runtime.

extern crate self as halaqa_schema;

pub mod column;
pub mod enums;
pub mod error;
pub mod registry;
pub mod shape;
pub mod table;

pub use column::{Column, ColumnType, ColumnValue};
pub use enums::{EnumDef, SchemaEnum};
pub use error::SchemaError;
pub use registry::Schema;
pub use shape::{FieldShape, RecordShape, ShapeKind, deserialize_present};
pub use table::{Cardinality, PRIMARY_KEY, Relationship, Table, TableDef};
