use super::SnapshotSource;
use crate::config::WindowConfig;
use crate::debug_if_enabled;
use crate::error::{RabbitError, Result};
use crate::services::poll::poll_until;
use crate::window::{WindowId, WindowSnapshot};
use std::cell::Cell;
use std::time::Duration;
use tracing::info;

/// Ждёт появления окна, которого не было в снимке до запуска.
///
/// Уведомления о создании окна нет, поэтому список опрашивается с
/// фиксированным интервалом до общего таймаута. Сбои утилиты листинга во
/// время ожидания не прерывают его: под нагрузкой wmctrl иногда падает.
pub struct NewWindowDetector<'a> {
    source: SnapshotSource<'a>,
    app_signature: String,
    interval: Duration,
    deadline: Duration,
}

impl<'a> NewWindowDetector<'a> {
    pub fn new(
        source: SnapshotSource<'a>,
        app_signature: impl Into<String>,
        interval: Duration,
        deadline: Duration,
    ) -> Self {
        Self {
            source,
            app_signature: app_signature.into(),
            interval,
            deadline,
        }
    }

    pub fn from_config(source: SnapshotSource<'a>, window: &WindowConfig) -> Self {
        Self::new(
            source,
            window.app_signature.clone(),
            Duration::from_millis(window.poll_interval_ms),
            Duration::from_millis(window.detection_timeout_ms),
        )
    }

    /// На снимок "до" уходит не больше этой доли общего таймаута
    const BEFORE_SHARE: u32 = 5;

    /// Снимок окон приложения до запуска.
    ///
    /// Сбой листинга повторяется с тем же интервалом, пока не исчерпан
    /// бюджет `deadline / 5`. Тогда возвращается последняя ошибка.
    pub async fn before_launch(&self) -> Result<WindowSnapshot> {
        let source = self.source;
        let signature = self.app_signature.as_str();
        let budget = (self.deadline / Self::BEFORE_SHARE).max(self.interval);

        let last_error = Cell::new(None);
        let errors = &last_error;

        let snapshot = poll_until(self.interval, budget, move || async move {
            match source.snapshot(signature).await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    debug_if_enabled!("Снимок до запуска не удался, повторим: {}", e);
                    errors.set(Some(e));
                    None
                }
            }
        })
        .await;

        match snapshot {
            Some(snapshot) => {
                if snapshot.is_empty() {
                    debug_if_enabled!("Окон '{}' до запуска нет", self.app_signature);
                }
                Ok(snapshot)
            }
            None => Err(last_error.into_inner().unwrap_or_else(|| {
                RabbitError::Timeout(format!("список окон не получен за {:?}", budget))
            })),
        }
    }

    /// Возвращает первое новое окно или `DetectionTimeout`
    pub async fn await_new_window(&self, before: &WindowSnapshot) -> Result<WindowId> {
        let source = self.source;
        let signature = self.app_signature.as_str();

        let detected = poll_until(self.interval, self.deadline, move || async move {
            match source.snapshot(signature).await {
                Ok(current) => current.first_new_since(before).cloned(),
                Err(e) => {
                    debug_if_enabled!("Листинг окон не удался, повторим: {}", e);
                    None
                }
            }
        })
        .await;

        match detected {
            Some(id) => {
                info!("Обнаружено новое окно: {}", id);
                Ok(id)
            }
            None => Err(RabbitError::DetectionTimeout(self.deadline)),
        }
    }
}
