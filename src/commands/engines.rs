use crate::config::{Config, SearchEngine};
use crate::error::Result;
use tracing::info;

pub fn list(config: &Config) {
    if config.search_engines.is_empty() {
        println!("Поисковики не настроены.");
        return;
    }

    println!("Поисковики ({}):\n", config.search_engines.len());
    for engine in &config.search_engines {
        println!("  {}", engine.menu_label());
        println!("     {}\n", engine.url);
    }
}

pub fn add(config: &mut Config, name: &str, url: &str, key: &str) -> Result<()> {
    let engine = SearchEngine::new(name, url, key);
    config.add_engine(engine)?;
    save(config)?;

    info!("Добавлен поисковик '{}' с ключом '{}'", name, key);
    println!("Добавлен поисковик: {} ({}) -> {}", name, key, url);
    Ok(())
}

pub fn remove(config: &mut Config, key: &str) -> Result<()> {
    let removed = config.remove_engine(key)?;
    save(config)?;

    info!("Удалён поисковик '{}'", removed.name);
    println!("Удалён поисковик: {} ({})", removed.name, key);
    Ok(())
}

pub fn edit(config: &mut Config, key: &str, name: &str, url: &str, new_key: &str) -> Result<()> {
    let updated = SearchEngine::new(name, url, new_key);
    let old = config.edit_engine(key, updated)?;
    save(config)?;

    println!("Поисковик обновлён:");
    println!("   Было:  {} ({}) -> {}", old.name, old.key, old.url);
    println!("   Стало: {} ({}) -> {}", name, new_key, url);
    Ok(())
}

fn save(config: &Config) -> Result<()> {
    config.save()?;
    info!("Конфигурация сохранена в {:?}", config.source());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_engine_changes_are_persisted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::load(&path).unwrap();
        add(&mut config, "Rust docs", "https://docs.rs/releases/search?query=%s", "r").unwrap();
        edit(&mut config, "d", "DDG", "https://duckduckgo.com/?q=%s&ia=web", "g").unwrap();
        remove(&mut config, "w").unwrap();

        let reloaded = Config::load(&path).unwrap();
        let keys: Vec<&str> = reloaded.search_engines.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["g", "r"]);
        assert_eq!(reloaded.find_engine("g").unwrap().name, "DDG");
    }

    #[test]
    fn test_rejected_change_is_not_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::load(&path).unwrap();
        assert!(add(&mut config, "Broken", "https://example.com", "b").is_err());
        assert!(remove(&mut config, "z").is_err());
        assert!(!path.exists());
    }
}
