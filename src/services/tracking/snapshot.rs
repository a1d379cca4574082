use crate::error::Result;
use crate::services::window_tools::WindowLister;
use crate::window::WindowSnapshot;
use tracing::debug;

/// Снимки списка окон поверх утилиты листинга. Только чтение.
#[derive(Clone, Copy)]
pub struct SnapshotSource<'a> {
    lister: &'a dyn WindowLister,
}

impl<'a> SnapshotSource<'a> {
    pub fn new(lister: &'a dyn WindowLister) -> Self {
        Self { lister }
    }

    /// Окна, в заголовке которых есть `app_signature`
    pub async fn snapshot(&self, app_signature: &str) -> Result<WindowSnapshot> {
        let windows = self.lister.list_windows().await?;
        let snapshot = WindowSnapshot::filtered(&windows, app_signature);
        debug!(
            "Снимок '{}': {} из {} окон",
            app_signature,
            snapshot.len(),
            windows.len()
        );
        Ok(snapshot)
    }

    /// Все живые окна, без фильтра по приложению
    pub async fn live(&self) -> Result<WindowSnapshot> {
        let windows = self.lister.list_windows().await?;
        Ok(WindowSnapshot::unfiltered(&windows))
    }
}
