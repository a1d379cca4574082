use crate::error::{RabbitError, Result};
use crate::services::process::is_available;
use tracing::{info, warn};

/// Внешние утилиты, без которых горячие клавиши не работают
pub const REQUIRED_TOOLS: [&str; 5] = ["sxhkd", "xdotool", "wmctrl", "xdpyinfo", "xsel"];

/// Проверить наличие необходимых утилит
pub async fn check_dependencies() -> Result<()> {
    info!("Проверка внешних утилит...");

    let mut missing = Vec::new();
    for tool in REQUIRED_TOOLS {
        if is_available(tool).await {
            info!("{} найден", tool);
        } else {
            warn!("{} не найден в PATH", tool);
            missing.push(tool);
        }
    }

    if !missing.is_empty() {
        return Err(RabbitError::Config(format!(
            "не хватает утилит: {}. Установите: {}",
            missing.join(", "),
            install_command(&missing)
        )));
    }

    check_x11_session();

    info!("Проверка внешних утилит завершена успешно");
    Ok(())
}

/// Команда установки для Debian/Ubuntu
pub fn install_command(missing: &[&str]) -> String {
    // xdpyinfo поставляется пакетом x11-utils
    let packages: Vec<&str> = missing
        .iter()
        .map(|tool| match *tool {
            "xdpyinfo" => "x11-utils",
            other => other,
        })
        .collect();
    format!("sudo apt install {}", packages.join(" "))
}

fn check_x11_session() {
    match std::env::var("XDG_SESSION_TYPE") {
        Ok(session) if session == "wayland" => {
            warn!("⚠️  Сессия Wayland: wmctrl и xdotool видят только окна XWayland");
        }
        _ => {}
    }

    if std::env::var("DISPLAY").is_err() {
        warn!("Переменная DISPLAY не задана - X11 утилиты работать не будут");
    }
}
