//! Schema steps for the device-local store
//!
//! Each step runs in one transaction together with its `schema_migrations`
//! row, so a failed step leaves the store at the previous version.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{info, instrument, warn};

use crate::error::Result;

/// `(version, description, sql)`, versions sequential from 1
const STEPS: &[(u32, &str, &str)] = &[(
    1,
    "Device-local key/value store",
    "CREATE TABLE IF NOT EXISTS local_storage (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );",
)];

fn latest() -> u32 {
    STEPS.last().map(|(version, ..)| *version).unwrap_or(0)
}

/// Highest applied step, 0 for a fresh store
pub(crate) fn schema_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;
    Ok(version.unwrap_or(0))
}

/// Bring the store up to the latest step and return its version
#[instrument(skip(conn))]
pub(crate) fn migrate(conn: &mut Connection) -> Result<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );",
    )?;

    let from = schema_version(conn)?;
    if from > latest() {
        warn!(found = from, known = latest(), "Store written by a newer build");
        return Ok(from);
    }

    for &(version, description, sql) in STEPS.iter().filter(|(v, ..)| *v > from) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, description, applied_at)
             VALUES (?1, ?2, ?3)",
            params![version, description, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        info!(version, description, "Applied store migration");
    }

    schema_version(conn)
}
