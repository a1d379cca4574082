use super::WindowLister;
use crate::error::Result;
use crate::services::process::run_tool;
use crate::window::{ListedWindow, Rect, WindowId};

pub struct Wmctrl;

impl Wmctrl {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_listing(stdout: &str) -> Vec<ListedWindow> {
        stdout.lines().filter_map(ListedWindow::parse_line).collect()
    }

    pub async fn remove_maximized(&self, id: &WindowId) -> Result<()> {
        run_tool(
            "wmctrl",
            &["-i", "-r", id.as_str(), "-b", "remove,maximized_vert,maximized_horz"],
        )
        .await?;
        Ok(())
    }

    pub async fn move_resize(&self, id: &WindowId, rect: Rect) -> Result<()> {
        let geometry = Self::geometry_arg(rect);
        run_tool("wmctrl", &["-i", "-r", id.as_str(), "-e", &geometry]).await?;
        Ok(())
    }

    /// Формат `-e`: gravity,x,y,w,h
    fn geometry_arg(rect: Rect) -> String {
        format!("0,{},{},{},{}", rect.x, rect.y, rect.width, rect.height)
    }
}

#[async_trait::async_trait]
impl WindowLister for Wmctrl {
    async fn list_windows(&self) -> Result<Vec<ListedWindow>> {
        let stdout = run_tool("wmctrl", &["-l"]).await?;
        Ok(Self::parse_listing(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_skips_blank_lines() {
        let windows = Wmctrl::parse_listing("0x01 0 h A\n\n0x02 0 h B - Mozilla Firefox\n");
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].raw_id, "0x02");
    }

    #[test]
    fn geometry_argument_uses_default_gravity() {
        let rect = Rect { x: 1150, y: 80, width: 650, height: 900 };
        assert_eq!(Wmctrl::geometry_arg(rect), "0,1150,80,650,900");
    }
}
