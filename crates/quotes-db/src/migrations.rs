use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Quotes DB: running migration v1 (initial schema)");
        // NOCASE on the id makes lookups case-insensitive and keeps ids
        // unique regardless of case.
        conn.execute_batch(
            "
            CREATE TABLE quotes (
                id                  TEXT PRIMARY KEY COLLATE NOCASE,
                created_timestamp   INTEGER NOT NULL,
                messages            TEXT NOT NULL
            );

            CREATE INDEX idx_quotes_created
                ON quotes(created_timestamp DESC);

            CREATE TABLE tokens (
                token       TEXT PRIMARY KEY,
                active      INTEGER NOT NULL DEFAULT 1,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            INSERT INTO schema_version (version) VALUES (1);
            "
        )?;
    }

    Ok(())
}
