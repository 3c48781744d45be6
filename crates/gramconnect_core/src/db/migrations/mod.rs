//! Schema steps for the `kv_store` table.
//!
//! Step `n` (1-based) in `KV_STEPS` moves `PRAGMA user_version` from `n - 1`
//! to `n`. Steps are append-only.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const KV_STEPS: &[&str] = &[include_str!("0001_kv_store.sql")];

/// `user_version` of a fully migrated store file.
pub const KV_SCHEMA_VERSION: u32 = KV_STEPS.len() as u32;

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `kv_store` up to `KV_SCHEMA_VERSION` in a single transaction.
pub fn migrate_kv_store(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > KV_SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: KV_SCHEMA_VERSION,
        });
    }

    let pending = &KV_STEPS[found as usize..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for sql in pending {
        tx.execute_batch(sql)?;
    }
    tx.pragma_update(None, "user_version", KV_SCHEMA_VERSION)?;
    tx.commit()?;

    info!(
        "event=kv_migrate module=db status=ok from_version={found} to_version={KV_SCHEMA_VERSION}"
    );
    Ok(())
}
