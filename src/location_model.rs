//! Data model for the treasure hunt catalog.
//!
//! This module defines [`LocationRecord`], the value handed to the presentation
//! layer, together with the fixed seed [`CATALOG`] and the persisted table layout.
//! Records are plain values: nothing here touches the database.

use serde::{Deserialize, Serialize};

/// Schema version stamped into the database through `PRAGMA user_version`.
///
/// Bumping this value makes [`LocationStore`](crate::location_store::LocationStore)
/// drop the `locations` table and reseed it on next open, discarding progress.
pub const SCHEMA_VERSION: i32 = 2;

/// DDL for the single `locations` table.
pub(crate) const CREATE_LOCATIONS_TABLE: &str = "CREATE TABLE locations (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    image_url  TEXT NOT NULL,
    is_found   INTEGER NOT NULL DEFAULT 0
)";

pub(crate) const DROP_LOCATIONS_TABLE: &str = "DROP TABLE IF EXISTS locations";

/// A catalog entry before it has been assigned an identity by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedLocation {
    pub name: &'static str,
    pub image_url: &'static str,
}

/// The ten seed locations, in insertion order.
///
/// Insertion order defines identity: the first entry receives id 1 on a
/// fresh database, the second id 2, and so on.
pub const CATALOG: [SeedLocation; 10] = [
    SeedLocation { name: "Library", image_url: "https://picsum.photos/id/1015/400/300" },
    SeedLocation { name: "Town Hall", image_url: "https://picsum.photos/id/1011/400/300" },
    SeedLocation { name: "Museum", image_url: "https://picsum.photos/id/1025/400/300" },
    SeedLocation { name: "Train Station", image_url: "https://picsum.photos/id/1003/400/300" },
    SeedLocation { name: "Park", image_url: "https://picsum.photos/id/103/400/300" },
    SeedLocation { name: "Coffee Shop", image_url: "https://picsum.photos/id/1074/400/300" },
    SeedLocation { name: "Art Gallery", image_url: "https://picsum.photos/id/1080/400/300" },
    SeedLocation { name: "Clock Tower", image_url: "https://picsum.photos/id/106/400/300" },
    SeedLocation { name: "Statue", image_url: "https://picsum.photos/id/1062/400/300" },
    SeedLocation { name: "Market", image_url: "https://picsum.photos/id/1084/400/300" },
];

/// One treasure hunt location as stored in the `locations` table.
///
/// Only `is_found` ever changes after seeding. A record returned by the store
/// is a snapshot: it is not updated when the store is mutated, so callers
/// re-read after [`mark_found`](crate::location_store::LocationStore::mark_found)
/// or [`reset_all`](crate::location_store::LocationStore::reset_all).
///
/// Serialized with camelCase keys for the FFI layer:
///
/// ```rust
/// use treasure_hunt_core::location_model::LocationRecord;
///
/// let record = LocationRecord {
///     id: 1,
///     name: "Library".to_string(),
///     image_url: "https://picsum.photos/id/1015/400/300".to_string(),
///     is_found: false,
/// };
///
/// let json = serde_json::to_string(&record)?;
/// assert!(json.contains(r#""imageUrl""#));
/// assert!(json.contains(r#""isFound":false"#));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Row id assigned by SQLite. Never reused because of `AUTOINCREMENT`.
    pub id: i64,

    /// Human readable label shown on the location card.
    pub name: String,

    /// Remote image shown for the location. Fetching it is the caller's job.
    pub image_url: String,

    pub is_found: bool,
}

impl LocationRecord {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(LocationRecord {
            id: row.get("id")?,
            name: row.get("name")?,
            image_url: row.get("image_url")?,
            is_found: row.get::<_, i64>("is_found")? == 1,
        })
    }
}
