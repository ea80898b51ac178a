use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::column::Column;
use crate::shape::{RecordShape, ShapeKind};

/// Every table is keyed by this column.
pub const PRIMARY_KEY: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    OneToOne,
    ManyToOne,
}

/// Foreign key from `column` to `target_table.target_column`.
///
/// Descriptive only; the store enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub column: &'static str,
    pub target_table: &'static str,
    pub target_column: &'static str,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub relationships: &'static [Relationship],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_shape(&self) -> RecordShape {
        RecordShape::derive(self, ShapeKind::Row)
    }

    pub fn insert_shape(&self) -> RecordShape {
        RecordShape::derive(self, ShapeKind::Insert)
    }

    pub fn update_shape(&self) -> RecordShape {
        RecordShape::derive(self, ShapeKind::Update)
    }

    pub fn relationship(&self, column: &str) -> Option<&'static Relationship> {
        self.relationships.iter().find(|r| r.column == column)
    }
}

/// A row type generated by [`table!`](crate::table!), tied to its insert and
/// update shapes.
pub trait Table: Serialize + DeserializeOwned {
    type Insert: Serialize + DeserializeOwned;
    type Update: Serialize + DeserializeOwned + Default;

    const DEF: TableDef;
}

/// Generates the row, insert and update structs for one table plus its
/// [`Table`] impl, from a single column list.
///
/// ```ignore
/// table! {
///     "events" => Event, EventInsert, EventUpdate {
///         id: Uuid = default,
///         title: String,
///         location: Option<String>,
///         created_at: DateTime<Utc> = default,
///     }
///     relations {
///         organizer_id -> "profiles".id (ManyToOne),
///     }
/// }
/// ```
///
/// `= default` marks a column the store fills in when an insert omits it.
/// The calling crate must depend on `serde` and `halaqa_schema`.
#[macro_export]
macro_rules! table {
    (
        $(#[$meta:meta])*
        $table:literal => $row:ident, $insert:ident, $update:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty $(= $default:ident)? ),+ $(,)?
        }
        $( relations {
            $( $rcol:ident -> $rtable:literal . $rtcol:ident ($card:ident) ),+ $(,)?
        } )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $row {
            $( $(#[$fmeta])* pub $field: $ty, )+
        }

        #[doc = concat!("Insert payload for `", $table, "`. Columns with a store default may be left unset.")]
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $insert {
            $(
                $( #[serde($default, skip_serializing_if = "Option::is_none")] )?
                pub $field: $crate::__insert_type!($ty $(, $default)?),
            )+
        }

        #[doc = concat!("Partial patch for `", $table, "`. Unset fields are left untouched.")]
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $update {
            $(
                #[serde(
                    default,
                    skip_serializing_if = "Option::is_none",
                    deserialize_with = "halaqa_schema::deserialize_present"
                )]
                pub $field: ::std::option::Option<$ty>,
            )+
        }

        impl $crate::Table for $row {
            type Insert = $insert;
            type Update = $update;

            const DEF: $crate::TableDef = $crate::TableDef {
                name: $table,
                columns: &[
                    $(
                        $crate::Column {
                            name: stringify!($field),
                            ty: <$ty as $crate::ColumnValue>::TYPE,
                            nullable: <$ty as $crate::ColumnValue>::NULLABLE,
                            has_default: $crate::__has_default!($($default)?),
                        },
                    )+
                ],
                relationships: &[
                    $($(
                        $crate::Relationship {
                            column: stringify!($rcol),
                            target_table: $rtable,
                            target_column: stringify!($rtcol),
                            cardinality: $crate::Cardinality::$card,
                        },
                    )+)?
                ],
            };
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __insert_type {
    ($ty:ty, default) => { ::std::option::Option<$ty> };
    ($ty:ty) => { $ty };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __has_default {
    (default) => { true };
    () => { false };
}
