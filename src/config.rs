use crate::error::{RabbitError, Result};
use crate::rabbit_error;
use crate::services::selection::SelectionPolicy;
use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub search_engines: Vec<SearchEngine>,
    pub interface: InterfaceConfig,
    pub database: DatabaseConfig,
    pub behavior: BehaviorConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
    // Путь, из которого загружена конфигурация - нужен для save()
    #[serde(skip)]
    source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchEngine {
    pub name: String,
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InterfaceConfig {
    pub launcher: String,
    pub dmenu_args: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firefox_profile: Option<String>,
    pub selection_method: SelectionPolicy,
    pub selection_timeout_ms: u64,
    pub log_selections: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Подстрока заголовка, по которой отбираются окна браузера
    pub app_signature: String,
    pub browser: String,
    pub width: u32,
    pub height: u32,
    pub right_margin: u32,
    pub top_margin: u32,
    pub poll_interval_ms: u64,
    pub detection_timeout_ms: u64,
    /// Пауза между снятием максимизации и установкой геометрии
    pub settle_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub to_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_engines: vec![
                SearchEngine {
                    name: "DuckDuckGo".to_string(),
                    url: "https://duckduckgo.com/?q=%s".to_string(),
                    key: "d".to_string(),
                },
                SearchEngine {
                    name: "Wikipedia".to_string(),
                    url: "https://en.wikipedia.org/w/index.php?search=%s".to_string(),
                    key: "w".to_string(),
                },
            ],
            interface: InterfaceConfig::default(),
            database: DatabaseConfig::default(),
            behavior: BehaviorConfig::default(),
            window: WindowConfig::default(),
            logging: LoggingConfig::default(),
            source: None,
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            launcher: "dmenu".to_string(),
            dmenu_args: Vec::new(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            firefox_profile: None,
            selection_method: SelectionPolicy::Auto,
            selection_timeout_ms: 1000,
            log_selections: false,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            app_signature: "Mozilla Firefox".to_string(),
            browser: "firefox".to_string(),
            width: 650,
            height: 900,
            right_margin: 120,
            top_margin: 80,
            poll_interval_ms: 100,
            detection_timeout_ms: 5000,
            settle_delay_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: true,
        }
    }
}

impl Config {
    /// Загружает конфигурацию: встроенные значения, затем JSON-файл, затем `RABBITHOLE_*`.
    /// Отсутствующий файл не является ошибкой.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Json::file(config_path))
            .merge(Env::prefixed("RABBITHOLE_").split("__"));

        let mut config: Config = figment.extract().map_err(|e| {
            rabbit_error!(config, "не удалось загрузить конфигурацию из {:?}: {}", config_path, e)
        })?;

        config.validate()?;
        config.source = Some(config_path.to_path_buf());

        Ok(config)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Записывает конфигурацию обратно в файл, из которого она была загружена
    pub fn save(&self) -> Result<()> {
        let path = self
            .source
            .as_ref()
            .ok_or_else(|| rabbit_error!(config, "путь к файлу конфигурации неизвестен"))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(self)
            .map_err(|e| rabbit_error!(internal, "сериализация конфигурации: {}", e))?;
        fs::write(path, data)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(rabbit_error!(config, "неверный уровень логирования: {}", other)),
        }

        if self.interface.launcher.trim().is_empty() {
            return Err(rabbit_error!(config, "interface.launcher не может быть пустым"));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(rabbit_error!(config, "размер окна должен быть больше нуля"));
        }

        if self.window.poll_interval_ms == 0 {
            return Err(rabbit_error!(config, "poll_interval_ms должно быть больше 0"));
        }

        if self.window.detection_timeout_ms < self.window.poll_interval_ms {
            return Err(rabbit_error!(
                config,
                "detection_timeout_ms ({}) меньше poll_interval_ms ({})",
                self.window.detection_timeout_ms,
                self.window.poll_interval_ms
            ));
        }

        if self.behavior.selection_timeout_ms == 0 {
            return Err(rabbit_error!(config, "selection_timeout_ms должно быть больше 0"));
        }

        for (i, engine) in self.search_engines.iter().enumerate() {
            engine
                .validate()
                .map_err(|e| rabbit_error!(config, "поисковик #{}: {}", i + 1, e))?;

            if self.search_engines[..i].iter().any(|other| other.key == engine.key) {
                return Err(rabbit_error!(config, "ключ '{}' указан дважды", engine.key));
            }
        }

        Ok(())
    }

    pub fn find_engine(&self, key: &str) -> Option<&SearchEngine> {
        self.search_engines.iter().find(|engine| engine.key == key)
    }

    pub fn add_engine(&mut self, engine: SearchEngine) -> Result<()> {
        engine.validate()?;

        if let Some(existing) = self.find_engine(&engine.key) {
            return Err(rabbit_error!(
                invalid_input,
                "ключ '{}' уже занят поисковиком '{}'",
                engine.key,
                existing.name
            ));
        }

        self.search_engines.push(engine);
        Ok(())
    }

    /// Удаляет поисковик и возвращает его
    pub fn remove_engine(&mut self, key: &str) -> Result<SearchEngine> {
        let index = self
            .search_engines
            .iter()
            .position(|engine| engine.key == key)
            .ok_or_else(|| rabbit_error!(invalid_input, "поисковик с ключом '{}' не найден", key))?;

        Ok(self.search_engines.remove(index))
    }

    /// Заменяет поисковик с ключом `key` и возвращает прежнюю запись
    pub fn edit_engine(&mut self, key: &str, updated: SearchEngine) -> Result<SearchEngine> {
        updated.validate()?;

        let index = self
            .search_engines
            .iter()
            .position(|engine| engine.key == key)
            .ok_or_else(|| rabbit_error!(invalid_input, "поисковик с ключом '{}' не найден", key))?;

        if updated.key != key {
            if let Some(other) = self.find_engine(&updated.key) {
                return Err(rabbit_error!(
                    invalid_input,
                    "ключ '{}' уже занят поисковиком '{}'",
                    updated.key,
                    other.name
                ));
            }
        }

        Ok(std::mem::replace(&mut self.search_engines[index], updated))
    }
}

impl SearchEngine {
    pub fn new(name: impl Into<String>, url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            key: key.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.chars().count() != 1 {
            return Err(RabbitError::InvalidInput(format!(
                "ключ должен состоять из одного символа, получено: '{}'",
                self.key
            )));
        }

        if !self.url.contains("%s") {
            return Err(RabbitError::InvalidInput(
                "URL должен содержать %s для подстановки запроса".to_string(),
            ));
        }

        Ok(())
    }

    /// Подставляет закодированный запрос вместо каждого `%s`
    pub fn build_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.url.replace("%s", &encoded)
    }

    /// Строка пункта меню: `k: Name`
    pub fn menu_label(&self) -> String {
        format!("{}: {}", self.key, self.name)
    }
}
