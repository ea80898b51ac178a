use anyhow::Result;
use halaqa_schema::{Cardinality, Column, ColumnType, PRIMARY_KEY, Schema, SchemaError, TableDef};
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection, schema: &Schema) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (generated schema, {} tables)", schema.tables().len());
        let ddl = schema_sql(schema)?;
        // Dropping the transaction on error rolls the partial schema back.
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(&ddl)?;
        tx.execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
        tx.commit()?;
    }

    info!("Database migrations complete");
    Ok(())
}

/// DDL for every table and its indexes.
pub fn schema_sql(schema: &Schema) -> Result<String, SchemaError> {
    let mut sql = String::new();
    for table in schema.tables() {
        sql.push_str(&table_sql(schema, table)?);
        sql.push('\n');
    }
    Ok(sql)
}

pub fn table_sql(schema: &Schema, table: &TableDef) -> Result<String, SchemaError> {
    let columns = table
        .columns
        .iter()
        .map(|column| column_sql(schema, table, column))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);\n",
        table.name,
        columns.join(",\n    ")
    );

    for rel in table.relationships {
        sql.push_str(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table}({column});\n",
            table = table.name,
            column = rel.column,
        ));
    }
    if table.column("created_at").is_some() {
        sql.push_str(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_created ON {table}(created_at);\n",
            table = table.name,
        ));
    }

    Ok(sql)
}

fn column_sql(schema: &Schema, table: &TableDef, column: &Column) -> Result<String, SchemaError> {
    let affinity = match column.ty {
        ColumnType::Integer | ColumnType::Boolean => "INTEGER",
        ColumnType::Real => "REAL",
        _ => "TEXT",
    };
    let mut sql = format!("{} {}", column.name, affinity);

    if column.name == PRIMARY_KEY {
        sql.push_str(" PRIMARY KEY");
        return Ok(sql);
    }

    if !column.nullable {
        sql.push_str(" NOT NULL");
    }

    if column.has_default {
        if let Some(default) = default_sql(schema, column)? {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default);
        }
    }

    match column.ty {
        ColumnType::Enum(name) => {
            let tags = schema.enum_values(name)?;
            let list = tags.iter().map(|t| quote(t)).collect::<Vec<_>>().join(", ");
            sql.push_str(&format!(" CHECK ({} IN ({}))", column.name, list));
        }
        ColumnType::Boolean => {
            sql.push_str(&format!(" CHECK ({} IN (0, 1))", column.name));
        }
        _ => {}
    }

    if let Some(rel) = table.relationship(column.name) {
        if rel.cardinality == Cardinality::OneToOne {
            sql.push_str(" UNIQUE");
        }
        sql.push_str(&format!(" REFERENCES {}({})", rel.target_table, rel.target_column));
    }

    Ok(sql)
}

/// SQL-level default for a defaulted column. Uuid and timestamp defaults are
/// filled in by the store on insert instead.
fn default_sql(schema: &Schema, column: &Column) -> Result<Option<String>, SchemaError> {
    let default = match column.ty {
        ColumnType::Boolean | ColumnType::Integer => Some("0".to_owned()),
        ColumnType::Real => Some("0.0".to_owned()),
        ColumnType::Text => Some(quote("")),
        ColumnType::Json => Some(quote("{}")),
        ColumnType::TextArray => Some(quote("[]")),
        ColumnType::Enum(name) => schema.enumeration(name)?.default_tag().map(quote),
        ColumnType::Uuid | ColumnType::Timestamp => None,
    };
    Ok(default)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
