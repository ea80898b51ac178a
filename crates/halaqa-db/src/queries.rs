use anyhow::{Result, anyhow};
use chrono::Utc;
use halaqa_schema::{ColumnType, PRIMARY_KEY, ShapeKind, Table, TableDef};
use rusqlite::{Connection, params_from_iter};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::Database;
use crate::convert::{canonical_key, format_timestamp, from_sql, to_sql};

impl Database {
    // -- Untyped (JSON) access, used by the HTTP layer --

    /// Inserts a row, filling store defaults, and returns it as stored.
    pub fn insert_json(&self, table: &str, mut payload: Map<String, Value>) -> Result<Value> {
        let def = self.schema.check_payload(table, &payload, ShapeKind::Insert)?;
        fill_defaults(def, &mut payload);

        let id = payload
            .get(PRIMARY_KEY)
            .and_then(Value::as_str)
            .map(canonical_key)
            .ok_or_else(|| anyhow!("Insert into `{}` produced no id", def.name))?;

        let mut columns = Vec::with_capacity(payload.len());
        let mut values = Vec::with_capacity(payload.len());
        for column in def.columns {
            if let Some(value) = payload.get(column.name) {
                columns.push(column.name);
                values.push(to_sql(column, value)?);
            }
        }

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            def.name,
            columns.join(", "),
            placeholders.join(", ")
        );

        self.with_conn(|conn| {
            conn.execute(&sql, params_from_iter(values))?;
            query_row_by_id(conn, def, &id)?
                .ok_or_else(|| anyhow!("Row {} vanished from `{}` after insert", id, def.name))
        })
    }

    /// Applies a partial patch. Returns `None` when no row has `id`.
    pub fn update_json(
        &self,
        table: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>> {
        let def = self.schema.check_payload(table, &patch, ShapeKind::Update)?;
        let id = canonical_key(id);

        if patch.is_empty() {
            return self.with_conn(|conn| query_row_by_id(conn, def, &id));
        }

        let mut assignments = Vec::with_capacity(patch.len());
        let mut values = Vec::with_capacity(patch.len() + 1);
        for column in def.columns {
            if let Some(value) = patch.get(column.name) {
                values.push(to_sql(column, value)?);
                assignments.push(format!("{} = ?{}", column.name, values.len()));
            }
        }
        values.push(rusqlite::types::Value::Text(id.clone()));

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            def.name,
            assignments.join(", "),
            PRIMARY_KEY,
            values.len()
        );
        let key = patch
            .get(PRIMARY_KEY)
            .and_then(Value::as_str)
            .map_or_else(|| id.clone(), canonical_key);

        self.with_conn(|conn| {
            let changed = conn.execute(&sql, params_from_iter(values))?;
            if changed == 0 {
                return Ok(None);
            }
            query_row_by_id(conn, def, &key)
        })
    }

    pub fn get_json(&self, table: &str, id: &str) -> Result<Option<Value>> {
        let def = self.schema.table(table)?;
        self.with_conn(|conn| query_row_by_id(conn, def, &canonical_key(id)))
    }

    /// Newest rows first.
    pub fn list_json(&self, table: &str, limit: u32) -> Result<Vec<Value>> {
        let def = self.schema.table(table)?;
        self.with_conn(|conn| query_rows(conn, def, limit))
    }

    // -- Typed access --

    pub fn insert<T: Table>(&self, row: &T::Insert) -> Result<T> {
        let stored = self.insert_json(T::DEF.name, to_object(row)?)?;
        Ok(serde_json::from_value(stored)?)
    }

    pub fn update<T: Table>(&self, id: &Uuid, patch: &T::Update) -> Result<Option<T>> {
        let stored = self.update_json(T::DEF.name, &id.to_string(), to_object(patch)?)?;
        stored
            .map(serde_json::from_value)
            .transpose()
            .map_err(anyhow::Error::from)
    }

    pub fn get<T: Table>(&self, id: &Uuid) -> Result<Option<T>> {
        let stored = self.get_json(T::DEF.name, &id.to_string())?;
        stored
            .map(serde_json::from_value)
            .transpose()
            .map_err(anyhow::Error::from)
    }

    pub fn list<T: Table>(&self, limit: u32) -> Result<Vec<T>> {
        self.list_json(T::DEF.name, limit)?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(anyhow::Error::from))
            .collect()
    }
}

fn to_object<S: serde::Serialize>(value: &S) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("Expected a JSON object, got {}", other)),
    }
}

/// Drops nulls in defaulted columns and fills the defaults SQLite cannot
/// express: fresh ids and the current time.
fn fill_defaults(def: &TableDef, payload: &mut Map<String, Value>) {
    for column in def.columns.iter().filter(|c| c.has_default) {
        if payload.get(column.name).is_some_and(Value::is_null) {
            payload.remove(column.name);
        }
        if payload.contains_key(column.name) {
            continue;
        }
        match column.ty {
            ColumnType::Uuid => {
                payload.insert(column.name.to_owned(), Value::String(Uuid::new_v4().to_string()));
            }
            ColumnType::Timestamp => {
                payload.insert(column.name.to_owned(), Value::String(format_timestamp(Utc::now())));
            }
            _ => {}
        }
    }
}

fn select_sql(def: &TableDef) -> String {
    let columns: Vec<&str> = def.columns.iter().map(|c| c.name).collect();
    format!("SELECT {} FROM {}", columns.join(", "), def.name)
}

fn read_row(def: &TableDef, row: &rusqlite::Row<'_>) -> Result<Value> {
    let mut object = Map::with_capacity(def.columns.len());
    for (index, column) in def.columns.iter().enumerate() {
        object.insert(column.name.to_owned(), from_sql(column, row.get_ref(index)?)?);
    }
    Ok(Value::Object(object))
}

fn query_row_by_id(conn: &Connection, def: &TableDef, id: &str) -> Result<Option<Value>> {
    let sql = format!("{} WHERE {} = ?1", select_sql(def), PRIMARY_KEY);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id])?;
    rows.next()?.map(|row| read_row(def, row)).transpose()
}

fn query_rows(conn: &Connection, def: &TableDef, limit: u32) -> Result<Vec<Value>> {
    let order = if def.column("created_at").is_some() { "created_at" } else { "rowid" };
    let sql = format!("{} ORDER BY {} DESC LIMIT ?1", select_sql(def), order);

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([limit])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(read_row(def, row)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use halaqa_schema::SchemaError;
    use halaqa_types::enums::{EventCategory, Gender, ListingCategory, ListingStatus, PostCategory};
    use halaqa_types::tables::*;
    use serde_json::json;

    use super::*;

    fn member(db: &Database, name: &str) -> Profile {
        db.insert::<Profile>(&ProfileInsert {
            id: None,
            full_name: name.into(),
            email: format!("{}@isoc.example", name.to_lowercase()),
            university: Some("UCL".into()),
            avatar_url: None,
            created_at: None,
        })
        .unwrap()
    }

    fn schema_error(err: anyhow::Error) -> SchemaError {
        err.downcast::<SchemaError>().expect("expected a schema error")
    }

    #[test]
    fn test_insert_fills_defaults() {
        let db = Database::open_in_memory().unwrap();
        let seller = member(&db, "Yusuf");

        let listing = db
            .insert::<MarketplaceListing>(&MarketplaceListingInsert {
                id: None,
                seller_id: seller.id,
                title: "Prayer mat".into(),
                description: None,
                price: 12.5,
                category: ListingCategory::Other,
                status: None,
                images: None,
                views: None,
                created_at: None,
            })
            .unwrap();

        assert_eq!(listing.status, ListingStatus::Available);
        assert!(listing.images.is_empty());
        assert_eq!(listing.views, 0);
        assert_eq!(listing.seller_id, seller.id);
        assert!(!listing.id.is_nil());
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let db = Database::open_in_memory().unwrap();
        let author = member(&db, "Maryam");
        let post = db
            .insert::<ForumPost>(&ForumPostInsert {
                id: None,
                author_id: author.id,
                title: "Reading list for Ramadan".into(),
                content: "Suggestions welcome".into(),
                category: Some(PostCategory::General),
                tags: Some(vec!["ramadan".into()]),
                likes: None,
                dislikes: None,
                reply_count: None,
                created_at: None,
            })
            .unwrap();

        let patch = ForumPostUpdate {
            likes: Some(3),
            ..Default::default()
        };
        let updated = db.update::<ForumPost>(&post.id, &patch).unwrap().unwrap();
        assert_eq!(updated.likes, 3);
        assert_eq!(updated.title, post.title);
        assert_eq!(updated.tags, vec!["ramadan".to_string()]);

        let missing = db.update::<ForumPost>(&Uuid::new_v4(), &patch).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_patch_can_set_nullable_column_to_null() {
        let db = Database::open_in_memory().unwrap();
        let organizer = member(&db, "Bilal");
        let event = db
            .insert::<Event>(&EventInsert {
                id: None,
                title: "Seerah night".into(),
                description: Some("Episode 4".into()),
                category: EventCategory::Halaqa,
                audience: Some(Gender::Mixed),
                location: Some("Prayer room".into()),
                starts_at: Utc.with_ymd_and_hms(2025, 3, 7, 18, 30, 0).unwrap(),
                ends_at: None,
                organizer_id: organizer.id,
                capacity: None,
                interested_count: None,
                is_featured: Some(true),
                created_at: None,
            })
            .unwrap();
        assert!(event.is_featured);

        let id = event.id.to_string();
        let patched = db
            .update_json("events", &id, json!({ "location": null }).as_object().unwrap().clone())
            .unwrap()
            .unwrap();
        assert_eq!(patched["location"], Value::Null);
        assert_eq!(patched["description"], json!("Episode 4"));
    }

    #[test]
    fn test_contract_violations_rejected_before_sql() {
        let db = Database::open_in_memory().unwrap();
        let seller = member(&db, "Aisha");

        let bad = json!({
            "seller_id": seller.id,
            "title": "Laptop",
            "description": null,
            "price": 300,
            "category": "vehicles",
        });
        let err = db
            .insert_json("marketplace_listings", bad.as_object().unwrap().clone())
            .unwrap_err();
        assert_eq!(
            schema_error(err),
            SchemaError::InvalidEnumValue {
                enum_name: "listing_category",
                value: "vehicles".into()
            }
        );

        let err = db.list_json("sessions", 10).unwrap_err();
        assert_eq!(schema_error(err), SchemaError::UnknownTable("sessions".into()));
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let db = Database::open_in_memory().unwrap();
        let orphan = json!({
            "user_id": Uuid::new_v4(),
            "prayer": "fajr",
            "prayed_at": "2025-03-01T05:10:00Z",
            "notes": null,
        });
        let err = db
            .insert_json("prayer_sessions", orphan.as_object().unwrap().clone())
            .unwrap_err();
        assert!(err.downcast_ref::<rusqlite::Error>().is_some());
    }

    #[test]
    fn test_uuid_forms_resolve_to_one_row() {
        let db = Database::open_in_memory().unwrap();
        let id = Uuid::new_v4();
        let shouted = id.simple().to_string().to_uppercase();

        let stored = db
            .insert_json(
                "profiles",
                json!({
                    "id": &shouted,
                    "full_name": "Khadijah",
                    "email": "khadijah@isoc.example",
                    "university": null,
                    "avatar_url": null,
                })
                .as_object()
                .unwrap()
                .clone(),
            )
            .unwrap();
        assert_eq!(stored["id"], json!(id.to_string()));

        let profile = db.get::<Profile>(&id).unwrap().unwrap();
        assert_eq!(profile.full_name, "Khadijah");
        assert!(db.get_json("profiles", &shouted).unwrap().is_some());

        let role = json!({ "user_id": id.to_string(), "role": "moderator" });
        db.insert_json("user_roles", role.as_object().unwrap().clone()).unwrap();

        let patch = json!({ "university": "SOAS" });
        let patched = db
            .update_json("profiles", &id.braced().to_string(), patch.as_object().unwrap().clone())
            .unwrap()
            .unwrap();
        assert_eq!(patched["university"], json!("SOAS"));
    }

    #[test]
    fn test_one_to_one_enforced() {
        let db = Database::open_in_memory().unwrap();
        let user = member(&db, "Hamza");
        let prefs = NotificationPreferencesInsert {
            id: None,
            user_id: user.id,
            email_enabled: Some(true),
            prayer_reminders: None,
            settings: Some(json!({ "digest": "weekly" })),
            created_at: None,
        };

        let stored = db.insert::<NotificationPreferences>(&prefs).unwrap();
        assert_eq!(stored.settings, json!({ "digest": "weekly" }));
        assert!(!stored.prayer_reminders);
        assert!(db.insert::<NotificationPreferences>(&prefs).is_err());
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let db = Database::open_in_memory().unwrap();
        for name in ["Ali", "Fatima", "Umar"] {
            member(&db, name);
        }

        let rows = db.list::<Profile>(2).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].created_at >= rows[1].created_at);
        assert_eq!(db.list::<Profile>(50).unwrap().len(), 3);
    }
}
