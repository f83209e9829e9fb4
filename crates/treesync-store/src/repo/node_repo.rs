//! SQLite repository for node rows

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, Transaction};
use treesync_core::NodeRecord;

/// SQL access to the `nodes` table
pub struct NodeRepo;

impl NodeRepo {
    /// Insert one row within a transaction
    ///
    /// Re-inserting a known id overwrites it in place and keeps its
    /// position, so a resent create batch is harmless.
    pub fn upsert_tx(tx: &Transaction, node: &NodeRecord) -> Result<()> {
        tx.execute(
            "INSERT INTO nodes (id, parent_id, name, data) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                parent_id = excluded.parent_id,
                name = excluded.name,
                data = excluded.data",
            rusqlite::params![node.id, node.parent_id, node.name, node.data],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Overwrite one row by id within a transaction
    ///
    /// A `None` data clears the column. Returns false if no row matched.
    pub fn update_tx(tx: &Transaction, node: &NodeRecord) -> Result<bool> {
        let changed = tx
            .execute(
                "UPDATE nodes SET parent_id = ?2, name = ?3, data = ?4 WHERE id = ?1",
                rusqlite::params![node.id, node.parent_id, node.name, node.data],
            )
            .map_err(from_rusqlite)?;
        Ok(changed > 0)
    }

    /// Delete one row by id within a transaction; returns rows removed
    pub fn delete_tx(tx: &Transaction, id: &str) -> Result<u64> {
        let removed = tx
            .execute("DELETE FROM nodes WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        Ok(removed as u64)
    }

    /// All rows in insertion order
    pub fn load_all(conn: &Connection) -> Result<Vec<NodeRecord>> {
        let mut stmt = conn
            .prepare("SELECT id, parent_id, name, data FROM nodes ORDER BY seq")
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(NodeRecord {
                    id: row.get(0)?,
                    parent_id: row.get(1)?,
                    name: row.get(2)?,
                    data: row.get(3)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(rows)
    }

    pub fn count(conn: &Connection) -> Result<u64> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count as u64)
    }
}
