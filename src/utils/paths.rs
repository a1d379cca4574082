//! Расположение файлов для текущего (эффективного) пользователя.
//!
//! Хранилище одно: `~/.local/share/rabbithole`. Запасного системного каталога
//! нет - если каталог данных создать нельзя, команда завершается ошибкой.

use crate::error::{RabbitError, Result};
use directories::BaseDirs;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "rabbithole";

fn base_dirs() -> Result<BaseDirs> {
    BaseDirs::new().ok_or_else(|| {
        RabbitError::Config("не удалось определить домашний каталог пользователя".to_string())
    })
}

pub fn config_path() -> Result<PathBuf> {
    Ok(base_dirs()?.config_dir().join(APP_DIR).join("config.json"))
}

/// Каталог данных; создаётся при необходимости
pub fn data_dir() -> Result<PathBuf> {
    let dir = base_dirs()?.data_dir().join(APP_DIR);
    fs::create_dir_all(&dir).map_err(|e| {
        RabbitError::Config(format!("не удалось создать каталог данных {:?}: {}", dir, e))
    })?;
    Ok(dir)
}

pub fn database_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("searches.db"))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("rabbithole.log"))
}

pub fn sxhkd_config_path() -> Result<PathBuf> {
    Ok(base_dirs()?.config_dir().join("sxhkd").join("sxhkdrc"))
}
