use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::{SvodkaError, SvodkaResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS news (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    link TEXT NOT NULL UNIQUE,
    source TEXT NOT NULL,
    date TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_news_link ON news(link);
"#;

#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> SvodkaResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> SvodkaResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SvodkaError> {
        self.conn
            .lock()
            .map_err(|_| SvodkaError::Database(rusqlite::Error::InvalidQuery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_storage_has_news_table() {
        let storage = SqliteStorage::in_memory().unwrap();
        let conn = storage.connection().unwrap();

        let mut stmt = conn
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='news'")
            .unwrap();
        let count: i32 = stmt.query_row([], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }
}
