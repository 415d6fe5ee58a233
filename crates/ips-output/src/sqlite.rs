//! SQLite output backend (feature `sqlite`).
//!
//! One `readings` table: `tick` (primary key), `unix_time_secs`, then one
//! column per record field.  Floats get `REAL` affinity; integers and
//! booleans get `INTEGER`; missing readings are `NULL`.
//!
//! Creating a writer replaces any `readings` table already in the file, so
//! re-exporting into the same database holds exactly the latest run.

use std::path::Path;

use ips_core::{Column, Field, FieldKind};
use rusqlite::Connection;
use rusqlite::types::Value;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, TableRow};

pub const TABLE: &str = "readings";

/// Writes a run's table to an SQLite database.
pub struct SqliteWriter {
    conn:       Connection,
    insert_sql: String,
    columns:    usize,
    finished:   bool,
}

impl SqliteWriter {
    /// Open (or create) the database at `path` and (re)create the table.
    pub fn create(path: &Path, columns: &[Column]) -> OutputResult<Self> {
        let conn = Connection::open(path)?;

        let defs: Vec<String> = columns
            .iter()
            .map(|c| format!("{} {}", c.name, affinity(c.kind)))
            .collect();
        let mut ddl = String::from(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        );
        ddl.push_str(&format!(
            "DROP TABLE IF EXISTS {TABLE};
             CREATE TABLE {TABLE} (
                 tick           INTEGER PRIMARY KEY,
                 unix_time_secs INTEGER NOT NULL{}{}
             );",
            if defs.is_empty() { "" } else { ",\n" },
            defs.join(",\n"),
        ));
        conn.execute_batch(&ddl)?;

        let names: Vec<&str> = columns.iter().map(|c| c.name).collect();
        let placeholders: Vec<String> = (1..=columns.len() + 2).map(|i| format!("?{i}")).collect();
        let insert_sql = format!(
            "INSERT INTO {TABLE} (tick, unix_time_secs{}{}) VALUES ({})",
            if names.is_empty() { "" } else { ", " },
            names.join(", "),
            placeholders.join(", "),
        );

        Ok(Self {
            conn,
            insert_sql,
            columns: columns.len(),
            finished: false,
        })
    }

    /// The underlying connection, for queries after the run.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn affinity(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Float => "REAL",
        FieldKind::Integer | FieldKind::Boolean => "INTEGER",
    }
}

fn to_value(field: Field) -> Value {
    match field {
        Field::Float(v)   => Value::Real(v),
        Field::Integer(v) => Value::Integer(v),
        Field::Boolean(b) => Value::Integer(b as i64),
        Field::Empty      => Value::Null,
    }
}

impl OutputWriter for SqliteWriter {
    fn write_row(&mut self, row: &TableRow) -> OutputResult<()> {
        if row.fields.len() != self.columns {
            return Err(OutputError::SchemaMismatch {
                expected: self.columns,
                got:      row.fields.len(),
            });
        }
        let values = [Value::Integer(row.tick as i64), Value::Integer(row.unix_time_secs)]
            .into_iter()
            .chain(row.fields.iter().copied().map(to_value));
        let mut stmt = self.conn.prepare_cached(&self.insert_sql)?;
        stmt.execute(rusqlite::params_from_iter(values))?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
