use crate::domain::NewsItem;
use crate::errors::{SvodkaError, SvodkaResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::{NewsRepository, NewsRow};

pub struct SqliteNewsRepository {
    storage: SqliteStorage,
}

impl SqliteNewsRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl NewsRepository for SqliteNewsRepository {
    fn save(&self, item: &NewsItem) -> SvodkaResult<bool> {
        let conn = self.storage.connection()?;

        let changed = conn.execute(
            "INSERT OR IGNORE INTO news (title, link, source) VALUES (?1, ?2, ?3)",
            (&item.title, &item.link, &item.source),
        )?;

        Ok(changed > 0)
    }

    fn recent(&self, limit: usize) -> SvodkaResult<Vec<NewsRow>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT title, link, source, date FROM news ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit], |row| {
            Ok(NewsRow {
                title: row.get(0)?,
                link: row.get(1)?,
                source: row.get(2)?,
                saved_at: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(SvodkaError::from)
    }
}
