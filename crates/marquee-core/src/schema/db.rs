use rusqlite::{Connection, ErrorCode, Transaction};
use std::path::Path;

use crate::error::{Error, Result};

use super::migrations::MIGRATIONS;

/// The entity store: one SQLite connection with CRUD methods for venues,
/// artists and shows.
///
/// Construct one per request (or per process for the CLI) and pass it to
/// every operation. Writes take `&mut self` and run inside a single
/// transaction; reads take `&self`.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn init(conn: Connection) -> Result<Self> {
        // Per connection, not persisted in the file.
        conn.pragma_update(None, "foreign_keys", true)?;
        let mut db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    fn apply_migrations(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let applied: Vec<u32> = {
            let mut stmt = self
                .conn
                .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
            let versions = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            versions
        };

        for migration in MIGRATIONS {
            if applied.contains(&migration.version) {
                continue;
            }
            log::info!(
                "Applying migration {} ({})",
                migration.version,
                migration.name
            );
            let tx = self.conn.transaction()?;
            tx.execute_batch(migration.sql)?;
            tx.execute(
                "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                rusqlite::params![migration.version, migration.name],
            )?;
            tx.commit()?;
        }

        Ok(())
    }

    /// Run `op` inside one transaction.
    ///
    /// The transaction commits only when `op` succeeds. Any error, including
    /// an early `?` return, rolls everything back. SQLite constraint failures
    /// come back as [`Error::ConstraintViolation`] naming `entity`.
    pub(crate) fn write<T>(
        &mut self,
        entity: &'static str,
        op: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let tx = self.conn.transaction()?;
        match op(&tx) {
            Ok(value) => {
                tx.commit().map_err(|err| map_constraint(entity, err.into()))?;
                log::debug!("Committed {entity} write");
                Ok(value)
            }
            Err(err) => {
                log::debug!("Rolling back {entity} write: {err}");
                if let Err(rollback_err) = tx.rollback() {
                    log::warn!("Rollback of {entity} write failed: {rollback_err}");
                }
                Err(map_constraint(entity, err))
            }
        }
    }

    pub fn count_venues(&self) -> Result<usize> {
        self.count("venues")
    }

    pub fn count_artists(&self) -> Result<usize> {
        self.count("artists")
    }

    pub fn count_shows(&self) -> Result<usize> {
        self.count("shows")
    }

    fn count(&self, table: &'static str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        usize::try_from(count).map_err(|_| Error::InvalidData(format!("negative count in {table}")))
    }
}

/// Whether a row with `id` exists in `table`.
pub(crate) fn row_exists(conn: &Connection, table: &'static str, id: i64) -> Result<bool> {
    let exists = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn map_constraint(entity: &'static str, err: Error) -> Error {
    match err {
        Error::Database(sql_err)
            if sql_err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) =>
        {
            Error::constraint(entity, sql_err.to_string())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();
        let enabled: bool = db
            .conn()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert!(enabled);
    }

    #[test]
    fn test_reopen_does_not_reapply_migrations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("marquee.db");
        drop(Database::open(&path).unwrap());
        let db = Database::open(&path).unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_write_rolls_back_on_error() {
        let mut db = Database::open_in_memory().unwrap();
        let result: Result<()> = db.write("venue", |tx| {
            tx.execute(
                "INSERT INTO venues (name, city, state, address) VALUES ('A', 'B', 'C', 'D')",
                [],
            )?;
            Err(Error::InvalidData("abort".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(db.count_venues().unwrap(), 0);
    }

    #[test]
    fn test_write_maps_constraint_errors() {
        let mut db = Database::open_in_memory().unwrap();
        let err = db
            .write("show", |tx| {
                tx.execute(
                    "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (1, 1, 'x')",
                    [],
                )?;
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_constraint_violation(), "{err}");
        assert_eq!(db.count_shows().unwrap(), 0);
    }
}
