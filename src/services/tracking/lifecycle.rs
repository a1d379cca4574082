use super::{NewWindowDetector, Reconciler, SnapshotSource};
use crate::context::AppContext;
use crate::error::{RabbitError, Result};
use crate::window::{geometry, ScreenSize, WindowId};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Результат открытия окна
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Окно найдено, размещено и записано в реестр
    Tracked(WindowId),
    /// Браузер открыт, но окно не отслеживается
    Untracked,
}

/// Результат команды закрытия
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed { id: WindowId, title: String },
    /// Активное окно не наше - ничего не делаем
    NotTracked(WindowId),
    NoActiveWindow,
}

/// Жизненный цикл исследовательского окна: Untracked -> Tracked -> Removed.
///
/// Отслеживание второстепенно: любой сбой при открытии оставляет окно
/// открытым, но без записи в реестре. При закрытии ошибки хранилища фатальны.
pub struct Lifecycle<'a> {
    ctx: &'a AppContext,
}

impl<'a> Lifecycle<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    fn source(&self) -> SnapshotSource<'a> {
        SnapshotSource::new(self.ctx.desktop.lister.as_ref())
    }

    /// Открывает `url` в новом окне браузера и пытается взять его под учёт
    pub async fn open_and_track(&self, url: &str) -> Result<OpenOutcome> {
        let detector = NewWindowDetector::from_config(self.source(), &self.ctx.config.window);

        // Без снимка "до" любое старое окно браузера сошло бы за новое
        let before = match detector.before_launch().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Не удалось получить список окон до запуска, окно не будет отслеживаться: {}", e);
                None
            }
        };

        self.ctx.desktop.launcher.launch(url).await?;

        let Some(before) = before else {
            return Ok(OpenOutcome::Untracked);
        };

        let id = match detector.await_new_window(&before).await {
            Ok(id) => id,
            Err(RabbitError::DetectionTimeout(timeout)) => {
                warn!("Новое окно браузера не появилось за {:?}, отслеживание недоступно", timeout);
                return Ok(OpenOutcome::Untracked);
            }
            Err(e) => {
                warn!("Ошибка обнаружения окна: {}", e);
                return Ok(OpenOutcome::Untracked);
            }
        };

        self.position(&id).await;

        match self.ctx.db.registry().track(&id) {
            Ok(()) => {
                info!("Окно {} отслеживается как исследовательское", id);
                Ok(OpenOutcome::Tracked(id))
            }
            Err(e) => {
                warn!("Не удалось записать окно {} в реестр: {}", id, e);
                Ok(OpenOutcome::Untracked)
            }
        }
    }

    /// Размещает окно у правого края экрана. Сбои только логируются.
    async fn position(&self, id: &WindowId) {
        let window = &self.ctx.config.window;
        let control = &self.ctx.desktop.control;

        let screen = self.ctx.desktop.display.screen_size().await.unwrap_or_else(|e| {
            debug!("Размер экрана неизвестен ({}), используем {}", e, ScreenSize::FALLBACK);
            ScreenSize::FALLBACK
        });
        let rect = geometry::plan(screen, window);

        if let Err(e) = control.unmaximize(id).await {
            warn!("Не удалось снять максимизацию с окна {}: {}", id, e);
        }

        tokio::time::sleep(Duration::from_millis(window.settle_delay_ms)).await;

        match control.move_resize(id, rect).await {
            Ok(()) => info!("Окно {} размещено: {}", id, rect),
            Err(e) => warn!("Не удалось разместить окно {}: {}", id, e),
        }
    }

    /// Закрывает активное окно, если оно открыто нами; иначе ничего не делает
    pub async fn close_if_tracked(&self) -> Result<CloseOutcome> {
        let control = &self.ctx.desktop.control;

        let raw_id = match control.active_window().await {
            Ok(raw_id) => raw_id,
            Err(e) => {
                warn!("Не удалось определить активное окно: {}", e);
                return Ok(CloseOutcome::NoActiveWindow);
            }
        };
        let id = WindowId::normalize(&raw_id);

        let registry = self.ctx.db.registry();

        if let Err(e) = Reconciler::new(&registry, self.source()).reconcile().await {
            warn!("Не удалось очистить реестр от мёртвых окон: {}", e);
        }

        if !registry.contains(&id)? {
            debug!("Активное окно {} не исследовательское, пропускаем", id);
            return Ok(CloseOutcome::NotTracked(id));
        }

        let title = control.window_name(&raw_id).await.unwrap_or_default();

        control.close(&raw_id).await?;
        registry.remove(&id)?;

        info!("Закрыто исследовательское окно: {} ({})", id, title);
        Ok(CloseOutcome::Closed { id, title })
    }

    /// Удаляет из реестра окна, которых больше нет
    pub async fn cleanup(&self) -> Result<usize> {
        let registry = self.ctx.db.registry();
        Reconciler::new(&registry, self.source()).reconcile().await
    }
}
