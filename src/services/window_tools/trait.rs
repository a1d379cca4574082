use crate::config::Config;
use crate::error::Result;
use crate::services::browser::{BrowserLauncher, FirefoxLauncher};
use crate::window::{ListedWindow, Rect, ScreenSize, WindowId};
use std::sync::Arc;

/// Список окон верхнего уровня. Только чтение.
#[async_trait::async_trait]
pub trait WindowLister: Send + Sync {
    async fn list_windows(&self) -> Result<Vec<ListedWindow>>;
}

/// Управление конкретными окнами
#[async_trait::async_trait]
pub trait WindowControl: Send + Sync {
    /// Сырой идентификатор активного окна в том виде, в каком его вернула утилита
    async fn active_window(&self) -> Result<String>;
    async fn window_name(&self, raw_id: &str) -> Result<String>;
    async fn unmaximize(&self, id: &WindowId) -> Result<()>;
    async fn move_resize(&self, id: &WindowId, rect: Rect) -> Result<()>;
    async fn close(&self, raw_id: &str) -> Result<()>;
}

/// Сведения о дисплее
#[async_trait::async_trait]
pub trait DisplayInfo: Send + Sync {
    async fn screen_size(&self) -> Result<ScreenSize>;
}

/// Набор внешних утилит рабочего стола, с которыми работает трекер
#[derive(Clone)]
pub struct Desktop {
    pub lister: Arc<dyn WindowLister>,
    pub control: Arc<dyn WindowControl>,
    pub display: Arc<dyn DisplayInfo>,
    pub launcher: Arc<dyn BrowserLauncher>,
}

impl Desktop {
    /// Все роли исполняет один объект (dry-run и тесты)
    pub fn from_shared<T>(shared: Arc<T>) -> Self
    where
        T: WindowLister + WindowControl + DisplayInfo + BrowserLauncher + 'static,
    {
        Self {
            lister: shared.clone(),
            control: shared.clone(),
            display: shared.clone(),
            launcher: shared,
        }
    }
}

/// Factory function to create the desktop tools based on the dry_run flag
pub fn create_desktop(config: &Config, dry_run: bool) -> Desktop {
    if dry_run {
        let desktop = super::dry_run::DryRunDesktop::new(&config.window.app_signature);
        Desktop::from_shared(Arc::new(desktop))
    } else {
        Desktop {
            lister: Arc::new(super::wmctrl::Wmctrl::new()),
            control: Arc::new(super::x11::X11Control::new()),
            display: Arc::new(super::xdpyinfo::Xdpyinfo::new()),
            launcher: Arc::new(FirefoxLauncher::new(
                &config.window.browser,
                config.behavior.firefox_profile.clone(),
            )),
        }
    }
}
