use crate::error::{RabbitError, Result};
use crate::services::process::run_tool;
use tracing::debug;

pub struct Xdotool;

impl Xdotool {
    pub fn new() -> Self {
        Self
    }

    /// xdotool печатает идентификатор в десятичном виде
    pub async fn active_window(&self) -> Result<String> {
        let stdout = run_tool("xdotool", &["getactivewindow"]).await?;
        let raw_id = stdout.trim().to_string();
        debug!("xdotool получил активное окно: '{}'", raw_id);

        if raw_id.is_empty() {
            return Err(RabbitError::external("xdotool", "пустой идентификатор окна"));
        }
        Ok(raw_id)
    }

    pub async fn window_name(&self, raw_id: &str) -> Result<String> {
        let stdout = run_tool("xdotool", &["getwindowname", raw_id]).await?;
        Ok(stdout.trim().to_string())
    }

    pub async fn close(&self, raw_id: &str) -> Result<()> {
        run_tool("xdotool", &["windowclose", raw_id]).await?;
        Ok(())
    }
}
