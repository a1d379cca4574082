use crate::error::Result;
use crate::utils::{dependencies, paths};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Проверяет утилиты и записывает горячие клавиши sxhkd
pub async fn run() -> Result<()> {
    dependencies::check_dependencies().await?;

    let exe = std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "rabbithole".to_string());

    let config_path = paths::sxhkd_config_path()?;
    write_bindings(&config_path, &exe)?;

    println!("Создан конфиг sxhkd: {}", config_path.display());
    println!("\nДальше:");
    println!("1. Запустите sxhkd: sxhkd &");
    println!("2. Или добавьте в автозапуск (i3: exec sxhkd)");
    println!("\nКлавиши:");
    println!("  Ctrl+Space: поиск выделенного текста");
    println!("  Ctrl+Shift+Space: поиск с ручным вводом");
    println!("  Escape: закрыть активное исследовательское окно");
    Ok(())
}

fn write_bindings(config_path: &Path, exe: &str) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if config_path.exists() {
        warn!("Файл {:?} уже существует и будет перезаписан", config_path);
    }

    fs::write(config_path, sxhkd_bindings(exe))?;
    info!("Горячие клавиши записаны в {:?}", config_path);
    Ok(())
}

fn sxhkd_bindings(exe: &str) -> String {
    format!(
        "# Rabbit Hole hotkeys\n\
         ctrl + space\n    {exe} search\n\n\
         ctrl + shift + space\n    {exe} search --empty\n\n\
         # Close active research window\n\
         Escape\n    {exe} close\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bindings_cover_all_hotkeys() {
        let text = sxhkd_bindings("/usr/bin/rabbithole");
        assert!(text.contains("ctrl + space\n    /usr/bin/rabbithole search\n"));
        assert!(text.contains("ctrl + shift + space\n    /usr/bin/rabbithole search --empty\n"));
        assert!(text.contains("Escape\n    /usr/bin/rabbithole close\n"));
    }

    #[test]
    fn test_write_bindings_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sxhkd").join("sxhkdrc");

        write_bindings(&path, "rabbithole").unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Rabbit Hole hotkeys"));
    }
}
