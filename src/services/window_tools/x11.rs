use super::wmctrl::Wmctrl;
use super::xdotool::Xdotool;
use super::WindowControl;
use crate::error::Result;
use crate::window::{Rect, WindowId};

/// Активное окно и закрытие через xdotool, геометрия через wmctrl
pub struct X11Control {
    wmctrl: Wmctrl,
    xdotool: Xdotool,
}

impl X11Control {
    pub fn new() -> Self {
        Self {
            wmctrl: Wmctrl::new(),
            xdotool: Xdotool::new(),
        }
    }
}

#[async_trait::async_trait]
impl WindowControl for X11Control {
    async fn active_window(&self) -> Result<String> {
        self.xdotool.active_window().await
    }

    async fn window_name(&self, raw_id: &str) -> Result<String> {
        self.xdotool.window_name(raw_id).await
    }

    async fn unmaximize(&self, id: &WindowId) -> Result<()> {
        self.wmctrl.remove_maximized(id).await
    }

    async fn move_resize(&self, id: &WindowId, rect: Rect) -> Result<()> {
        self.wmctrl.move_resize(id, rect).await
    }

    async fn close(&self, raw_id: &str) -> Result<()> {
        self.xdotool.close(raw_id).await
    }
}
