use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Create tables. Indexes are created separately by the owners of each
/// table (see `create_user_indexes` / `create_game_indexes`).
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                user_name   TEXT NOT NULL,
                password    TEXT NOT NULL,
                role        TEXT NOT NULL DEFAULT 'user'
            );

            CREATE TABLE positions (
                user_name        TEXT PRIMARY KEY,
                name             TEXT NOT NULL,
                last_updated_ms  INTEGER NOT NULL,
                lon              REAL NOT NULL,
                lat              REAL NOT NULL
            );

            CREATE TABLE posts (
                id           TEXT PRIMARY KEY,
                task_text    TEXT NOT NULL,
                task_is_url  INTEGER NOT NULL DEFAULT 0,
                solution     TEXT NOT NULL,
                lon          REAL NOT NULL,
                lat          REAL NOT NULL
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

/// Login handles are unique.
pub fn create_user_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_user_name ON users(user_name);",
    )?;
    Ok(())
}

/// TTL column plus latitude prefilters for the proximity queries.
pub fn create_game_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_positions_last_updated ON positions(last_updated_ms);
        CREATE INDEX IF NOT EXISTS idx_positions_lat ON positions(lat);
        CREATE INDEX IF NOT EXISTS idx_posts_lat ON posts(lat);
        ",
    )?;
    Ok(())
}
