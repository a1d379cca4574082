use super::{DisplayInfo, WindowControl, WindowLister};
use crate::error::{RabbitError, Result};
use crate::services::browser::BrowserLauncher;
use crate::window::{ListedWindow, Rect, ScreenSize, WindowId};
use parking_lot::Mutex;
use tracing::info;

const FIRST_WINDOW_ID: u64 = 0x0440_0001;

#[derive(Debug, Default)]
struct DesktopState {
    windows: Vec<(u64, String)>,
    // Окна, запущенные, но ещё не видимые в списке: (id, заголовок, оставшиеся опросы)
    pending: Vec<(u64, String, usize)>,
    active: Option<u64>,
    next_id: u64,
    screen: Option<ScreenSize>,
    launched: Vec<String>,
    placements: Vec<(WindowId, Rect)>,
    closed: Vec<WindowId>,
}

/// Эмуляция рабочего стола в памяти для `--dry-run` и тестов.
///
/// Список окон выдаётся в формате wmctrl (`0x%08x`), активное окно в формате
/// xdotool (десятичное число), как у настоящих утилит.
pub struct DryRunDesktop {
    app_signature: String,
    reveal_after: usize,
    state: Mutex<DesktopState>,
}

impl DryRunDesktop {
    pub fn new(app_signature: &str) -> Self {
        Self {
            app_signature: app_signature.to_string(),
            reveal_after: 1,
            state: Mutex::new(DesktopState {
                next_id: FIRST_WINDOW_ID,
                screen: Some(ScreenSize::FALLBACK),
                ..DesktopState::default()
            }),
        }
    }

    /// Сколько опросов списка пройдёт, прежде чем запущенное окно станет видимым
    #[cfg(test)]
    pub fn with_reveal_after(mut self, polls: usize) -> Self {
        self.reveal_after = polls;
        self
    }

    #[cfg(test)]
    pub fn with_screen(self, screen: Option<ScreenSize>) -> Self {
        self.state.lock().screen = screen;
        self
    }

    /// Добавляет уже существующее окно и возвращает его идентификатор
    #[cfg(test)]
    pub fn add_window(&self, title: &str) -> WindowId {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.windows.push((id, title.to_string()));
        WindowId::normalize(&id.to_string())
    }

    /// Делает окно активным; `None` снимает фокус
    #[cfg(test)]
    pub fn focus(&self, id: Option<&WindowId>) {
        let mut state = self.state.lock();
        let active = id.and_then(|id| {
            state
                .windows
                .iter()
                .map(|(raw, _)| *raw)
                .find(|raw| WindowId::normalize(&raw.to_string()) == *id)
        });
        state.active = active;
    }

    /// Окно исчезает само (пользователь закрыл, браузер упал)
    #[cfg(test)]
    pub fn destroy(&self, id: &WindowId) {
        let mut state = self.state.lock();
        state
            .windows
            .retain(|(raw, _)| WindowId::normalize(&raw.to_string()) != *id);
    }

    #[cfg(test)]
    pub fn launched(&self) -> Vec<String> {
        self.state.lock().launched.clone()
    }

    #[cfg(test)]
    pub fn placements(&self) -> Vec<(WindowId, Rect)> {
        self.state.lock().placements.clone()
    }

    #[cfg(test)]
    pub fn closed(&self) -> Vec<WindowId> {
        self.state.lock().closed.clone()
    }

    fn find_window(state: &DesktopState, id: &WindowId) -> Option<usize> {
        state
            .windows
            .iter()
            .position(|(raw, _)| WindowId::normalize(&raw.to_string()) == *id)
    }

    fn missing(tool: &str, id: &WindowId) -> RabbitError {
        RabbitError::external(tool, format!("окно {} не найдено", id))
    }
}

#[async_trait::async_trait]
impl WindowLister for DryRunDesktop {
    async fn list_windows(&self) -> Result<Vec<ListedWindow>> {
        let mut state = self.state.lock();

        let mut revealed = Vec::new();
        state.pending.retain_mut(|(id, title, remaining)| {
            if *remaining == 0 {
                revealed.push((*id, title.clone()));
                false
            } else {
                *remaining -= 1;
                true
            }
        });
        state.windows.extend(revealed);

        Ok(state
            .windows
            .iter()
            .map(|(id, title)| ListedWindow::new(format!("0x{id:08x}"), format!("0 dry-run {title}")))
            .collect())
    }
}

#[async_trait::async_trait]
impl WindowControl for DryRunDesktop {
    async fn active_window(&self) -> Result<String> {
        self.state
            .lock()
            .active
            .map(|id| id.to_string())
            .ok_or_else(|| RabbitError::external("xdotool", "нет активного окна"))
    }

    async fn window_name(&self, raw_id: &str) -> Result<String> {
        let id = WindowId::normalize(raw_id);
        let state = self.state.lock();
        Self::find_window(&state, &id)
            .map(|index| state.windows[index].1.clone())
            .ok_or_else(|| Self::missing("xdotool", &id))
    }

    async fn unmaximize(&self, id: &WindowId) -> Result<()> {
        let state = self.state.lock();
        Self::find_window(&state, id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("wmctrl", id))
    }

    async fn move_resize(&self, id: &WindowId, rect: Rect) -> Result<()> {
        let mut state = self.state.lock();
        if Self::find_window(&state, id).is_none() {
            return Err(Self::missing("wmctrl", id));
        }
        info!("Dry-run: окно {} -> {}", id, rect);
        state.placements.push((id.clone(), rect));
        Ok(())
    }

    async fn close(&self, raw_id: &str) -> Result<()> {
        let id = WindowId::normalize(raw_id);
        let mut state = self.state.lock();
        let index = Self::find_window(&state, &id).ok_or_else(|| Self::missing("xdotool", &id))?;

        let (raw, title) = state.windows.remove(index);
        if state.active == Some(raw) {
            state.active = None;
        }
        info!("Dry-run: закрыто окно {} ({})", id, title);
        state.closed.push(id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl DisplayInfo for DryRunDesktop {
    async fn screen_size(&self) -> Result<ScreenSize> {
        self.state
            .lock()
            .screen
            .ok_or_else(|| RabbitError::external("xdpyinfo", "дисплей недоступен"))
    }
}

#[async_trait::async_trait]
impl BrowserLauncher for DryRunDesktop {
    async fn launch(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        let title = format!("{} - {}", url, self.app_signature);
        info!("Dry-run: открываем {} в окне 0x{:08x}", url, id);

        if self.reveal_after == 0 {
            state.windows.push((id, title));
        } else {
            state.pending.push((id, title, self.reveal_after));
        }
        state.active = Some(id);
        state.launched.push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn launched_window_appears_after_configured_polls() {
        let desktop = DryRunDesktop::new("Mozilla Firefox").with_reveal_after(2);
        desktop.launch("https://example.org").await.unwrap();

        assert!(desktop.list_windows().await.unwrap().is_empty());
        assert!(desktop.list_windows().await.unwrap().is_empty());
        let windows = desktop.list_windows().await.unwrap();
        assert_eq!(windows.len(), 1);
        assert!(windows[0].title.contains("Mozilla Firefox"));
        assert!(windows[0].raw_id.starts_with("0x"));
    }

    #[tokio::test]
    async fn active_window_is_reported_in_decimal() {
        let desktop = DryRunDesktop::new("Mozilla Firefox");
        let id = desktop.add_window("Terminal");
        desktop.focus(Some(&id));

        let raw = desktop.active_window().await.unwrap();
        assert!(raw.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(WindowId::normalize(&raw), id);
    }

    #[tokio::test]
    async fn closing_unknown_window_fails() {
        let desktop = DryRunDesktop::new("Mozilla Firefox");
        assert!(desktop.close("12345").await.is_err());
        assert!(desktop.closed().is_empty());
    }
}
