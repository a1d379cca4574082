use crate::config::WindowConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Размер экрана в пикселях
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    /// Используется, когда xdpyinfo недоступен или вывод не разобран
    pub const FALLBACK: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    /// Ищет строку `dimensions:    2560x1440 pixels (677x381 millimeters)`
    pub fn parse_xdpyinfo(output: &str) -> Option<Self> {
        let line = output.lines().find(|line| line.contains("dimensions:"))?;
        let (_, rest) = line.split_once("dimensions:")?;
        let token = rest.split_whitespace().next()?;
        let (width, height) = token.split_once('x')?;

        Some(Self {
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        })
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Целевая геометрия окна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Окно прижимается к правому краю экрана с отступами из конфигурации.
/// Если окно шире экрана, левый край не уходит за ноль.
pub fn plan(screen: ScreenSize, window: &WindowConfig) -> Rect {
    let right_edge = i64::from(screen.width) - i64::from(window.right_margin);
    let x = (right_edge - i64::from(window.width)).max(0);

    Rect {
        x: i32::try_from(x).unwrap_or(i32::MAX),
        y: i32::try_from(window.top_margin).unwrap_or(i32::MAX),
        width: window.width,
        height: window.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XDPYINFO_OUTPUT: &str = "\
name of display:    :0
screen #0:
  dimensions:    2560x1440 pixels (677x381 millimeters)
  resolution:    96x96 dots per inch
";

    #[test]
    fn parses_dimensions_line() {
        assert_eq!(
            ScreenSize::parse_xdpyinfo(XDPYINFO_OUTPUT),
            Some(ScreenSize { width: 2560, height: 1440 })
        );
    }

    #[test]
    fn missing_or_broken_dimensions_yield_none() {
        assert_eq!(ScreenSize::parse_xdpyinfo("name of display: :0"), None);
        assert_eq!(ScreenSize::parse_xdpyinfo("  dimensions:    widexhigh pixels"), None);
    }

    #[test]
    fn plan_anchors_to_right_edge() {
        let window = WindowConfig::default();
        let rect = plan(ScreenSize::FALLBACK, &window);

        assert_eq!(rect, Rect { x: 1920 - 650 - 120, y: 80, width: 650, height: 900 });
    }

    #[test]
    fn plan_is_deterministic() {
        let window = WindowConfig::default();
        let screen = ScreenSize { width: 2560, height: 1440 };
        assert_eq!(plan(screen, &window), plan(screen, &window));
    }

    #[test]
    fn plan_never_goes_left_of_screen() {
        let window = WindowConfig {
            width: 3000,
            ..WindowConfig::default()
        };
        let rect = plan(ScreenSize::FALLBACK, &window);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.width, 3000);
    }
}
