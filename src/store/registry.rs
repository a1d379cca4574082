use super::{unix_now, Database};
use crate::error::Result;
use crate::window::WindowId;
use rusqlite::params;
use std::collections::BTreeSet;

/// Запись реестра: окно, открытое для исследования
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub id: WindowId,
    pub created_at: i64,
}

/// Реестр исследовательских окон - единственное место, где хранится
/// связь "окно открыто нами". Ключ всегда каноническая форма WindowId.
pub struct ResearchRegistry<'a> {
    db: &'a Database,
}

impl<'a> ResearchRegistry<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Регистрирует окно; повторная регистрация обновляет время
    pub fn upsert(&self, id: &WindowId, created_at: i64) -> Result<()> {
        self.db.with_connection("зарегистрировать окно", |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO research_windows (window_id, created_at) VALUES (?1, ?2)",
                params![id.as_str(), created_at],
            )
        })?;
        Ok(())
    }

    pub fn track(&self, id: &WindowId) -> Result<()> {
        self.upsert(id, unix_now())
    }

    /// Удаляет окно из реестра. Отсутствующее окно не ошибка.
    /// Возвращает true, если запись действительно была.
    pub fn remove(&self, id: &WindowId) -> Result<bool> {
        let removed = self.db.with_connection("удалить окно из реестра", |conn| {
            conn.execute(
                "DELETE FROM research_windows WHERE window_id = ?1",
                params![id.as_str()],
            )
        })?;
        Ok(removed > 0)
    }

    pub fn contains(&self, id: &WindowId) -> Result<bool> {
        let count: i64 = self.db.with_connection("проверить реестр", |conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM research_windows WHERE window_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
        })?;
        Ok(count > 0)
    }

    pub fn list_all(&self) -> Result<BTreeSet<WindowId>> {
        Ok(self.entries()?.into_iter().map(|entry| entry.id).collect())
    }

    /// Все записи, от старых к новым
    pub fn entries(&self) -> Result<Vec<RegistryEntry>> {
        self.db.with_connection("прочитать реестр", |conn| {
            let mut stmt = conn.prepare(
                "SELECT window_id, created_at FROM research_windows ORDER BY created_at, window_id",
            )?;
            let rows = stmt.query_map([], |row| {
                let raw: String = row.get(0)?;
                Ok(RegistryEntry {
                    id: WindowId::normalize(&raw),
                    created_at: row.get(1)?,
                })
            })?;
            rows.collect()
        })
    }
}
