use rusqlite::{Connection, Result};

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS searches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query TEXT NOT NULL,
    engine_name TEXT NOT NULL,
    engine_url TEXT NOT NULL,
    trigger_method TEXT NOT NULL DEFAULT 'selection',
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
    session_id TEXT DEFAULT ''
);

CREATE TABLE IF NOT EXISTS research_windows (
    window_id TEXT PRIMARY KEY,
    created_at TIMESTAMP NOT NULL
);
"#;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
}
