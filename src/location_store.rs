//! Durable storage for the treasure hunt catalog.
//!
//! [`LocationStore`] owns a single SQLite connection. Opening a store creates
//! and seeds the `locations` table when needed; afterwards the only mutation is
//! flipping `is_found`, one record at a time through [`LocationStore::mark_found`]
//! or for the whole catalog through [`LocationStore::reset_all`].
//!
//! Every call is synchronous and writes through before returning. The store
//! never notifies anyone of changes: callers re-read after a write.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use rusqlite::{params, Connection, Transaction};

use crate::location_model::{
    LocationRecord, CATALOG, CREATE_LOCATIONS_TABLE, DROP_LOCATIONS_TABLE, SCHEMA_VERSION,
};
use crate::reward::HuntProgress;
use crate::store_error::StoreError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct LocationStore {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl LocationStore {
    /// Opens the store backed by the file `{name}.db`, creating and seeding it
    /// on first use.
    ///
    /// ```no_run
    /// use treasure_hunt_core::location_store::LocationStore;
    ///
    /// let store = LocationStore::init("treasure_hunt".to_string())?;
    /// assert_eq!(store.get_all_locations()?.len(), 10);
    /// # Ok::<(), treasure_hunt_core::store_error::StoreError>(())
    /// ```
    pub fn init(name: String) -> Result<Self, StoreError> {
        Self::open(format!("{name}.db"))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        info!("Opening location store at: {}", path.display());

        let conn = Connection::open(&path)
            .map_err(|e| StoreError::unavailable(&format!("cannot open {}", path.display()), e))?;

        Self::from_connection(conn, Some(path))
    }

    /// Opens a throwaway store that lives only as long as the returned value.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::unavailable("cannot open in-memory database", e))?;

        Self::from_connection(conn, None)
    }

    fn from_connection(mut conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StoreError::unavailable("cannot configure connection", e))?;

        initialize_schema(&mut conn).map_err(|e| match e {
            StoreError::StorageUnavailable(_) => e,
            other => StoreError::unavailable("schema initialization failed", other),
        })?;

        Ok(Self { conn: Some(conn), path })
    }

    /// Location of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn
            .as_ref()
            .ok_or_else(|| StoreError::StorageUnavailable("database has been closed".to_string()))
    }

    /// Returns every location in insertion order.
    pub fn get_all_locations(&self) -> Result<Vec<LocationRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, image_url, is_found FROM locations ORDER BY id")?;
        let rows = stmt.query_map([], LocationRecord::from_row)?;

        let mut locations = Vec::new();
        for location in rows {
            locations.push(location?);
        }

        Ok(locations)
    }

    pub fn count_found(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM locations WHERE is_found = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Number of locations in the catalog.
    pub fn total_count(&self) -> Result<usize, StoreError> {
        let count: i64 =
            self.conn()?
                .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Marks a location as found.
    ///
    /// Idempotent: an already found location is left alone, and an unknown id
    /// is silently ignored. Only storage failures are reported.
    pub fn mark_found(&self, id: i64) -> Result<(), StoreError> {
        match self.try_mark_found(id) {
            Err(StoreError::RecordNotFound(missing)) => {
                debug!("Ignoring mark_found for unknown location id {missing}");
                Ok(())
            }
            other => other,
        }
    }

    fn try_mark_found(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE locations SET is_found = 1 WHERE id = ?1 AND is_found = 0",
            params![id],
        )?;

        if changed > 0 {
            info!("Location {id} marked as found");
            return Ok(());
        }

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM locations WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StoreError::RecordNotFound(id));
        }

        debug!("Location {id} was already found");
        Ok(())
    }

    /// Puts every location back to unfound.
    pub fn reset_all(&self) -> Result<(), StoreError> {
        let changed = self.conn()?.execute("UPDATE locations SET is_found = 0", [])?;
        info!("Reset all locations ({changed} rows)");
        Ok(())
    }

    /// Reads the found count and catalog size and derives the reward state.
    pub fn progress(&self) -> Result<HuntProgress, StoreError> {
        let found = self.count_found()?;
        let total = self.total_count()?;
        Ok(HuntProgress::new(found, total))
    }

    /// Closes the underlying connection.
    ///
    /// Any later operation fails with [`StoreError::StorageUnavailable`]. Closing an
    /// already closed store is a no-op.
    pub fn close_database(&mut self) -> Result<(), StoreError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("Location store closed");
                Ok(())
            }
            Err((conn, e)) => {
                warn!("Failed to close location store: {e}");
                self.conn = Some(conn);
                Err(StoreError::Database(e))
            }
        }
    }
}

/// Brings the schema to [`SCHEMA_VERSION`].
///
/// A fresh database gets the table and the seed catalog. An older version is
/// dropped and reseeded, losing found progress. A newer version is refused.
fn initialize_schema(conn: &mut Connection) -> Result<(), StoreError> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version == SCHEMA_VERSION {
        debug!("Schema already at version {SCHEMA_VERSION}");
        return Ok(());
    }

    if version > SCHEMA_VERSION {
        return Err(StoreError::StorageUnavailable(format!(
            "database schema version {version} is newer than supported version {SCHEMA_VERSION}"
        )));
    }

    if version == 0 {
        info!("Creating locations table with {} seed locations", CATALOG.len());
    } else {
        warn!(
            "Upgrading schema from version {version} to {SCHEMA_VERSION}; found progress is discarded"
        );
    }

    let tx = conn.transaction()?;
    recreate_and_seed(&tx)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(())
}

fn recreate_and_seed(tx: &Transaction<'_>) -> Result<(), StoreError> {
    tx.execute(DROP_LOCATIONS_TABLE, [])?;
    tx.execute(CREATE_LOCATIONS_TABLE, [])?;

    let mut insert =
        tx.prepare("INSERT INTO locations (name, image_url, is_found) VALUES (?1, ?2, 0)")?;
    for seed in CATALOG.iter() {
        insert.execute(params![seed.name, seed.image_url])?;
    }

    Ok(())
}
