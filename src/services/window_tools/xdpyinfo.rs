use super::DisplayInfo;
use crate::error::{RabbitError, Result};
use crate::services::process::run_tool;
use crate::window::ScreenSize;

pub struct Xdpyinfo;

impl Xdpyinfo {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DisplayInfo for Xdpyinfo {
    async fn screen_size(&self) -> Result<ScreenSize> {
        let stdout = run_tool("xdpyinfo", &[]).await?;
        ScreenSize::parse_xdpyinfo(&stdout)
            .ok_or_else(|| RabbitError::external("xdpyinfo", "строка dimensions не найдена"))
    }
}
