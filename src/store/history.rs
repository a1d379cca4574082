use super::Database;
use crate::error::Result;
use rusqlite::params;

/// Запись истории поиска
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub query: String,
    pub engine_name: String,
    pub engine_url: String,
    pub trigger_method: String,
}

/// Строка истории вместе с временем и сессией
#[derive(Debug, Clone)]
pub struct LoggedSearch {
    pub record: SearchRecord,
    pub timestamp: String,
    pub session_id: String,
}

/// Журнал поисковых запросов, только добавление
pub struct SearchHistory<'a> {
    db: &'a Database,
}

impl<'a> SearchHistory<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Сессия - локальная дата `YYYY-MM-DD`
    pub fn log(&self, record: &SearchRecord) -> Result<i64> {
        self.db.with_connection("записать поиск в историю", |conn| {
            conn.execute(
                "INSERT INTO searches (query, engine_name, engine_url, trigger_method, session_id)
                 VALUES (?1, ?2, ?3, ?4, date('now', 'localtime'))",
                params![
                    record.query,
                    record.engine_name,
                    record.engine_url,
                    record.trigger_method
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Последние `limit` запросов, новые первыми
    pub fn recent(&self, limit: usize) -> Result<Vec<LoggedSearch>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.db.with_connection("прочитать историю", |conn| {
            let mut stmt = conn.prepare(
                "SELECT query, engine_name, engine_url, trigger_method, timestamp, session_id
                 FROM searches ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit], |row| {
                Ok(LoggedSearch {
                    record: SearchRecord {
                        query: row.get(0)?,
                        engine_name: row.get(1)?,
                        engine_url: row.get(2)?,
                        trigger_method: row.get(3)?,
                    },
                    timestamp: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    session_id: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            })?;
            rows.collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(query: &str) -> SearchRecord {
        SearchRecord {
            query: query.to_string(),
            engine_name: "DuckDuckGo".to_string(),
            engine_url: "https://duckduckgo.com/?q=%s".to_string(),
            trigger_method: "selection".to_string(),
        }
    }

    #[test]
    fn log_appends_and_recent_returns_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let history = db.history();

        let first = history.log(&record("first")).unwrap();
        let second = history.log(&record("second")).unwrap();
        assert!(second > first);

        let recent = history.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].record.query, "second");
        assert_eq!(recent[1].record, record("first"));
        assert_eq!(recent[0].session_id.len(), "2024-01-01".len());
        assert!(!recent[0].timestamp.is_empty());
    }

    #[test]
    fn recent_respects_limit() {
        let db = Database::open_in_memory().unwrap();
        let history = db.history();
        for i in 0..5 {
            history.log(&record(&format!("q{i}"))).unwrap();
        }
        assert_eq!(history.recent(2).unwrap().len(), 2);
    }
}
