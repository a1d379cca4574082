pub mod history;
pub mod registry;
mod schema;

use crate::error::{RabbitError, Result};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error};

pub use history::{SearchHistory, SearchRecord};
pub use registry::{RegistryEntry, ResearchRegistry};

/// SQLite-хранилище: реестр исследовательских окон и история поиска.
///
/// Соединение закрыто мьютексом, так что внутри процесса все обращения
/// идут последовательно. Каждая операция реестра - одна SQL-инструкция.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!("Открываем базу данных {:?}", path);
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        schema::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Выполняет операцию над соединением, логируя ошибку с описанием операции
    pub fn with_connection<F, T>(&self, operation: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn).map_err(|e| {
            error!("Не удалось {}: {}", operation, e);
            RabbitError::from(e)
        })
    }

    pub fn registry(&self) -> ResearchRegistry<'_> {
        ResearchRegistry::new(self)
    }

    pub fn history(&self) -> SearchHistory<'_> {
        SearchHistory::new(self)
    }
}

/// Текущее время в секундах Unix
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
