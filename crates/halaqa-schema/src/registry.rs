use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::column::{Column, ColumnType};
use crate::enums::EnumDef;
use crate::error::SchemaError;
use crate::shape::{RecordShape, ShapeKind};
use crate::table::{Relationship, TableDef};

/// Name-keyed view over every table and enumeration of one store.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    tables: &'static [TableDef],
    enums: &'static [EnumDef],
}

impl Schema {
    pub const fn new(tables: &'static [TableDef], enums: &'static [EnumDef]) -> Self {
        Self { tables, enums }
    }

    pub fn tables(&self) -> &'static [TableDef] {
        self.tables
    }

    pub fn enums(&self) -> &'static [EnumDef] {
        self.enums
    }

    pub fn table(&self, name: &str) -> Result<&'static TableDef, SchemaError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_owned()))
    }

    pub fn enumeration(&self, name: &str) -> Result<&'static EnumDef, SchemaError> {
        self.enums
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| SchemaError::UnknownEnum(name.to_owned()))
    }

    pub fn row_shape(&self, table: &str) -> Result<RecordShape, SchemaError> {
        Ok(self.table(table)?.row_shape())
    }

    pub fn insert_shape(&self, table: &str) -> Result<RecordShape, SchemaError> {
        Ok(self.table(table)?.insert_shape())
    }

    pub fn update_shape(&self, table: &str) -> Result<RecordShape, SchemaError> {
        Ok(self.table(table)?.update_shape())
    }

    /// Ordered legal tags of an enumeration. Unknown names are an error,
    /// never an empty list.
    pub fn enum_values(&self, name: &str) -> Result<&'static [&'static str], SchemaError> {
        Ok(self.enumeration(name)?.values)
    }

    pub fn relationships_of(&self, table: &str) -> Result<&'static [Relationship], SchemaError> {
        Ok(self.table(table)?.relationships)
    }

    /// Checks the registry is closed: enum columns name registered
    /// enumerations and foreign keys land on existing columns.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for table in self.tables {
            for column in table.columns {
                if let Some(enum_name) = column.ty.enum_name() {
                    if self.enumeration(enum_name).is_err() {
                        return Err(SchemaError::UnregisteredEnum {
                            table: table.name,
                            column: column.name,
                            enum_name,
                        });
                    }
                }
            }

            for rel in table.relationships {
                let dangling = || SchemaError::DanglingRelationship {
                    table: table.name,
                    column: rel.column,
                    target: format!("{}.{}", rel.target_table, rel.target_column),
                };
                if table.column(rel.column).is_none() {
                    return Err(dangling());
                }
                let target = self.table(rel.target_table).map_err(|_| dangling())?;
                if target.column(rel.target_column).is_none() {
                    return Err(dangling());
                }
            }
        }
        Ok(())
    }

    /// Validates a JSON payload against one of `table`'s shapes.
    ///
    /// For inserts, a `null` in a defaulted column counts as omitted.
    pub fn check_payload(
        &self,
        table: &str,
        payload: &Map<String, Value>,
        kind: ShapeKind,
    ) -> Result<&'static TableDef, SchemaError> {
        let def = self.table(table)?;

        for (key, value) in payload {
            let column = def.column(key).ok_or_else(|| SchemaError::UnknownColumn {
                table: def.name,
                column: key.clone(),
            })?;
            if value.is_null() {
                let omitted_default = kind == ShapeKind::Insert && column.has_default;
                if !column.nullable && !omitted_default {
                    return Err(SchemaError::NullViolation {
                        table: def.name,
                        column: column.name,
                    });
                }
                continue;
            }
            self.check_value(def, column, value)?;
        }

        for column in def.columns {
            if kind.requires(column) && !payload.contains_key(column.name) {
                return Err(SchemaError::MissingColumn {
                    table: def.name,
                    column: column.name,
                });
            }
        }

        Ok(def)
    }

    fn check_value(&self, def: &TableDef, column: &Column, value: &Value) -> Result<(), SchemaError> {
        let mismatch = || SchemaError::TypeMismatch {
            table: def.name,
            column: column.name,
            expected: column.ty,
        };

        let ok = match column.ty {
            ColumnType::Text => value.is_string(),
            ColumnType::Integer => value.is_i64(),
            ColumnType::Real => value.is_number(),
            ColumnType::Boolean => value.is_boolean(),
            ColumnType::Json => true,
            ColumnType::Uuid => value
                .as_str()
                .is_some_and(|s| s.parse::<Uuid>().is_ok()),
            ColumnType::Timestamp => value
                .as_str()
                .is_some_and(|s| s.parse::<DateTime<Utc>>().is_ok()),
            ColumnType::TextArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            ColumnType::Enum(enum_name) => {
                let tag = value.as_str().ok_or_else(mismatch)?;
                let tags = self.enumeration(enum_name)?;
                if !tags.contains(tag) {
                    return Err(SchemaError::InvalidEnumValue {
                        enum_name: tags.name,
                        value: tag.to_owned(),
                    });
                }
                true
            }
        };

        if ok { Ok(()) } else { Err(mismatch()) }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::Table;

    crate::enum_tags! {
        Shelf = "shelf" {
            Fiction => "fiction",
            Reference => "reference",
        }
    }

    crate::table! {
        "readers" => Reader, ReaderInsert, ReaderUpdate {
            id: Uuid = default,
            name: String,
            created_at: DateTime<Utc> = default,
        }
    }

    crate::table! {
        "books" => Book, BookInsert, BookUpdate {
            id: Uuid = default,
            title: String,
            shelf: Shelf,
            borrower_id: Option<Uuid>,
            tags: Vec<String> = default,
            created_at: DateTime<Utc> = default,
        }
        relations {
            borrower_id -> "readers".id (ManyToOne),
        }
    }

    static TABLES: [TableDef; 2] = [Reader::DEF, Book::DEF];
    static ENUMS: [EnumDef; 1] = [EnumDef::of::<Shelf>()];
    static LIBRARY: Schema = Schema::new(&TABLES, &ENUMS);

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_lookups_by_name() {
        assert_eq!(LIBRARY.enum_values("shelf").unwrap(), &["fiction", "reference"]);
        assert_eq!(LIBRARY.row_shape("books").unwrap().fields.len(), 6);
        let rels = LIBRARY.relationships_of("books").unwrap();
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].target_table, "readers");
        assert!(LIBRARY.relationships_of("readers").unwrap().is_empty());
        LIBRARY.validate().unwrap();
    }

    #[test]
    fn test_unknown_names_fail_loudly() {
        assert_eq!(
            LIBRARY.enum_values("not_a_real_enum"),
            Err(SchemaError::UnknownEnum("not_a_real_enum".into()))
        );
        assert_eq!(
            LIBRARY.insert_shape("loans").unwrap_err(),
            SchemaError::UnknownTable("loans".into())
        );
    }

    #[test]
    fn test_validate_catches_dangling_relationship() {
        static PARTIAL: [TableDef; 1] = [Book::DEF];
        let schema = Schema::new(&PARTIAL, &ENUMS);
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::DanglingRelationship { column: "borrower_id", .. })
        ));

        let no_enums = Schema::new(&TABLES, &[]);
        assert!(matches!(
            no_enums.validate(),
            Err(SchemaError::UnregisteredEnum { enum_name: "shelf", .. })
        ));
    }

    #[test]
    fn test_insert_payload_checks() {
        let ok = object(json!({ "title": "Riyad as-Salihin", "shelf": "reference", "borrower_id": null }));
        assert!(LIBRARY.check_payload("books", &ok, ShapeKind::Insert).is_ok());

        let bad_tag = object(json!({ "title": "x", "shelf": "poetry", "borrower_id": null }));
        assert_eq!(
            LIBRARY.check_payload("books", &bad_tag, ShapeKind::Insert).unwrap_err(),
            SchemaError::InvalidEnumValue { enum_name: "shelf", value: "poetry".into() }
        );

        let missing = object(json!({ "shelf": "fiction", "borrower_id": null }));
        assert_eq!(
            LIBRARY.check_payload("books", &missing, ShapeKind::Insert).unwrap_err(),
            SchemaError::MissingColumn { table: "books", column: "title" }
        );

        let extra = object(json!({ "title": "x", "shelf": "fiction", "borrower_id": null, "isbn": "1" }));
        assert!(matches!(
            LIBRARY.check_payload("books", &extra, ShapeKind::Insert),
            Err(SchemaError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_update_payload_checks() {
        let patch = object(json!({ "borrower_id": null }));
        assert!(LIBRARY.check_payload("books", &patch, ShapeKind::Update).is_ok());

        let null_title = object(json!({ "title": null }));
        assert_eq!(
            LIBRARY.check_payload("books", &null_title, ShapeKind::Update).unwrap_err(),
            SchemaError::NullViolation { table: "books", column: "title" }
        );

        let wrong_type = object(json!({ "tags": "one,two" }));
        assert!(matches!(
            LIBRARY.check_payload("books", &wrong_type, ShapeKind::Update),
            Err(SchemaError::TypeMismatch { column: "tags", .. })
        ));

        let bad_uuid = object(json!({ "borrower_id": "nobody" }));
        assert!(LIBRARY.check_payload("books", &bad_uuid, ShapeKind::Update).is_err());
    }
}
