use crate::config::Config;
use crate::error::Result;
use crate::services::menu::{create_menu, Menu};
use crate::services::selection::{create_selection_reader, SelectionReader};
use crate::services::window_tools::{create_desktop, Desktop};
use crate::store::Database;
use crate::utils::paths;
use tracing::{info, warn};

/// Всё состояние одного вызова команды: конфигурация, хранилище и внешние утилиты.
/// Создаётся один раз в main и передаётся компонентам по ссылке.
pub struct AppContext {
    pub config: Config,
    pub db: Database,
    pub desktop: Desktop,
    pub selection: Box<dyn SelectionReader>,
    pub menu: Box<dyn Menu>,
}

impl AppContext {
    pub fn new(
        config: Config,
        db: Database,
        desktop: Desktop,
        selection: Box<dyn SelectionReader>,
        menu: Box<dyn Menu>,
    ) -> Self {
        Self {
            config,
            db,
            desktop,
            selection,
            menu,
        }
    }

    /// Собирает контекст для реального запуска или для dry-run.
    /// В dry-run реестр живёт в памяти и не трогает файл пользователя.
    pub fn build(config: Config, dry_run: bool) -> Result<Self> {
        let db = if dry_run {
            warn!("Режим сухого запуска - внешние утилиты и база данных эмулируются");
            Database::open_in_memory()?
        } else {
            let db_path = match &config.database.path {
                Some(path) => path.clone(),
                None => paths::database_path()?,
            };
            info!("База данных: {:?}", db_path);
            Database::open(&db_path)?
        };

        let desktop = create_desktop(&config, dry_run);
        let selection = create_selection_reader(dry_run);
        let menu = create_menu(&config.interface, dry_run);

        Ok(Self::new(config, db, desktop, selection, menu))
    }
}
