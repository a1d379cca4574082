use crate::error::{RabbitError, Result};
use crate::services::process::spawn_detached;
use tracing::info;

/// Запуск браузера в новом окне
#[async_trait::async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, url: &str) -> Result<()>;
}

pub struct FirefoxLauncher {
    program: String,
    profile: Option<String>,
}

impl FirefoxLauncher {
    pub fn new(program: &str, profile: Option<String>) -> Self {
        Self {
            program: program.to_string(),
            profile: profile.filter(|p| !p.is_empty()),
        }
    }

    fn args(&self, url: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        args.push("--new-window".to_string());
        args.push(url.to_string());
        args
    }
}

#[async_trait::async_trait]
impl BrowserLauncher for FirefoxLauncher {
    async fn launch(&self, url: &str) -> Result<()> {
        let pid = spawn_detached(&self.program, &self.args(url)).map_err(|e| {
            RabbitError::Internal(format!(
                "не удалось запустить {} (установлен ли он?): {}",
                self.program, e
            ))
        })?;

        info!("{} запущен (pid {})", self.program, pid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_without_profile() {
        let launcher = FirefoxLauncher::new("firefox", None);
        assert_eq!(launcher.args("https://a"), vec!["--new-window", "https://a"]);
    }

    #[test]
    fn args_with_profile() {
        let launcher = FirefoxLauncher::new("firefox", Some("research".to_string()));
        assert_eq!(
            launcher.args("https://a"),
            vec!["--profile", "research", "--new-window", "https://a"]
        );
    }

    #[test]
    fn empty_profile_is_ignored() {
        let launcher = FirefoxLauncher::new("firefox", Some(String::new()));
        assert_eq!(launcher.args("https://a").len(), 2);
    }
}
