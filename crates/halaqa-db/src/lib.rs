pub mod convert;
pub mod migrations;
pub mod queries;

use anyhow::Result;
use halaqa_schema::Schema;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// SQLite-backed store enforcing the halaqa schema contract.
pub struct Database {
    conn: Mutex<Connection>,
    schema: &'static Schema,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let db = Self::init(conn)?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let schema = &halaqa_types::SCHEMA;
        schema.validate()?;
        migrations::run(&conn, schema)?;

        Ok(Self {
            conn: Mutex::new(conn),
            schema,
        })
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}
