use crate::scraper::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Opens (or creates) the SQLite file at `path` and applies the schema.
pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    info!("✅ Database ready at {}", path.display());
    Ok(conn)
}

/// Schema statements are all `IF NOT EXISTS`, so this is safe on an existing file.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
