use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};

use super::defaults;
use super::models::{ReferenceItem, ReferenceKind, ReferencePatch};
use super::resolver::ReferenceStore;
use crate::errors::StoreError;

/// Async-safe handle to the reference database.
///
/// Wraps `ReferenceDb` behind `Arc<Mutex>` and runs all access on tokio's
/// blocking thread pool via `spawn_blocking`, so synchronous SQLite I/O never
/// ties up async worker threads.
///
/// A handle built with [`DbHandle::unavailable`] has no database behind it:
/// every call fails with `StoreError::Unavailable`, so readers fall through
/// to their fallback collections.
#[derive(Clone)]
pub struct DbHandle {
    inner: Option<Arc<std::sync::Mutex<ReferenceDb>>>,
    open_error: Arc<str>,
}

impl DbHandle {
    pub fn new(db: ReferenceDb) -> Self {
        Self {
            inner: Some(Arc::new(std::sync::Mutex::new(db))),
            open_error: Arc::from(""),
        }
    }

    /// A handle for a database that could not be opened.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self {
            inner: None,
            open_error: Arc::from(reason),
        }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    fn not_open(&self) -> anyhow::Error {
        anyhow::anyhow!("reference database is not open: {}", self.open_error)
    }

    /// Run a closure with access to the database on a blocking thread.
    /// All data passed into `f` must be owned (`'static`).
    pub async fn call<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&ReferenceDb) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let Some(db) = self.inner.clone() else {
            return Err(StoreError::Unavailable(self.not_open()));
        };
        tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard).map_err(StoreError::Unavailable)
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }

    /// Acquire the database mutex synchronously. Only for startup, CLI
    /// commands and tests; never from a request handler.
    pub fn lock_sync(&self) -> Result<std::sync::MutexGuard<'_, ReferenceDb>> {
        self.inner
            .as_ref()
            .ok_or_else(|| self.not_open())?
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))
    }
}

#[async_trait]
impl ReferenceStore for DbHandle {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, StoreError> {
        self.call(move |db| db.list(kind)).await
    }

    async fn update(
        &self,
        kind: ReferenceKind,
        id: i64,
        patch: ReferencePatch,
    ) -> Result<Option<ReferenceItem>, StoreError> {
        self.call(move |db| db.update(kind, id, &patch)).await
    }
}

pub struct ReferenceDb {
    conn: Connection,
}

const COLUMNS: &str = "id, name, label, thai_label, description, thai_description, color";

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<ReferenceItem> {
    Ok(ReferenceItem {
        id: row.get(0)?,
        name: row.get(1)?,
        label: row.get(2)?,
        thai_label: row.get(3)?,
        description: row.get(4)?,
        thai_description: row.get(5)?,
        color: row.get(6)?,
    })
}

impl ReferenceDb {
    /// Open (or create) a SQLite database at the given path and run migrations.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open SQLite database")?;
        let db = Self { conn };
        db.run_migrations().context("Failed to run migrations")?;
        Ok(db)
    }

    /// Open an existing database for reading and updating. Never creates the
    /// file and never runs migrations; a missing file is an error.
    pub fn open_existing(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)
            .with_context(|| format!("Failed to open SQLite database at {}", path.display()))?;
        Ok(Self { conn })
    }

    /// Create an in-memory SQLite database (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        let db = Self { conn };
        db.run_migrations().context("Failed to run migrations")?;
        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        for kind in ReferenceKind::ALL {
            self.conn
                .execute_batch(&format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        name TEXT NOT NULL UNIQUE,
                        label TEXT NOT NULL,
                        thai_label TEXT,
                        description TEXT,
                        thai_description TEXT,
                        color TEXT,
                        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                    );",
                    kind.table()
                ))
                .with_context(|| format!("Failed to create {} table", kind.table()))?;
        }
        Ok(())
    }

    // ── Reads ─────────────────────────────────────────────────────────

    /// All rows of `kind`, ascending by id.
    pub fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM {} ORDER BY id", COLUMNS, kind.table()))
            .with_context(|| format!("Failed to prepare list for {}", kind))?;
        let rows = stmt
            .query_map([], item_from_row)
            .with_context(|| format!("Failed to query {}", kind.table()))?;
        let mut items = Vec::new();
        for row in rows {
            items.push(row.with_context(|| format!("Failed to read {} row", kind))?);
        }
        Ok(items)
    }

    pub fn get(&self, kind: ReferenceKind, id: i64) -> Result<Option<ReferenceItem>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, kind.table()),
                params![id],
                item_from_row,
            )
            .optional()
            .with_context(|| format!("Failed to get {} {}", kind, id))
    }

    pub fn count(&self, kind: ReferenceKind) -> Result<i64> {
        self.conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", kind.table()),
                [],
                |row| row.get(0),
            )
            .with_context(|| format!("Failed to count {}", kind.table()))
    }

    // ── Writes ────────────────────────────────────────────────────────

    /// Insert the built-in collection for `kind` if its table is empty.
    /// Returns the number of rows inserted.
    pub fn seed_defaults(&self, kind: ReferenceKind) -> Result<usize> {
        if self.count(kind)? > 0 {
            return Ok(0);
        }

        // Safety: DbHandle's Mutex already guarantees single-threaded access.
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;
        let rows = defaults::builtin(kind);
        for row in &rows {
            tx.execute(
                &format!(
                    "INSERT INTO {} ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    kind.table(),
                    COLUMNS
                ),
                params![
                    row.id,
                    row.name,
                    row.label,
                    row.thai_label,
                    row.description,
                    row.thai_description,
                    row.color
                ],
            )
            .with_context(|| format!("Failed to seed {} '{}'", kind, row.name))?;
        }
        tx.commit().context("Failed to commit seed")?;
        Ok(rows.len())
    }

    /// Seed every kind. Returns `(kind, inserted)` pairs.
    pub fn seed_all(&self) -> Result<Vec<(ReferenceKind, usize)>> {
        let mut seeded = Vec::with_capacity(ReferenceKind::ALL.len());
        for kind in ReferenceKind::ALL {
            seeded.push((kind, self.seed_defaults(kind)?));
        }
        Ok(seeded)
    }

    /// Apply the fields present in `patch`. Returns `None` when no row has `id`.
    pub fn update(
        &self,
        kind: ReferenceKind,
        id: i64,
        patch: &ReferencePatch,
    ) -> Result<Option<ReferenceItem>> {
        let changed = self
            .conn
            .execute(
                &format!(
                    "UPDATE {} SET
                        label = COALESCE(?1, label),
                        thai_label = COALESCE(?2, thai_label),
                        description = COALESCE(?3, description),
                        thai_description = COALESCE(?4, thai_description),
                        color = COALESCE(?5, color),
                        updated_at = datetime('now')
                     WHERE id = ?6",
                    kind.table()
                ),
                params![
                    patch.label,
                    patch.thai_label,
                    patch.description,
                    patch.thai_description,
                    patch.color,
                    id
                ],
            )
            .with_context(|| format!("Failed to update {} {}", kind, id))?;
        if changed == 0 {
            return Ok(None);
        }
        self.get(kind, id)
    }

    #[cfg(test)]
    fn insert(&self, kind: ReferenceKind, name: &str, label: &str) -> Result<i64> {
        self.conn.execute(
            &format!("INSERT INTO {} (name, label) VALUES (?1, ?2)", kind.table()),
            params![name, label],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}
