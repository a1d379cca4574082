use crate::config::InterfaceConfig;
use crate::error::{RabbitError, Result};
use crate::rabbit_error;
use crate::services::process::run_tool_with_input;
use tracing::info;

/// Внешнее меню выбора (dmenu и совместимые)
#[async_trait::async_trait]
pub trait Menu: Send + Sync {
    /// Возвращает выбранную строку; пустой выбор считается отменой
    async fn choose(&self, prompt: &str, options: &[String]) -> Result<String>;

    /// Свободный ввод строки
    async fn prompt(&self, prompt: &str) -> Result<String>;
}

pub struct Dmenu {
    launcher: String,
    extra_args: Vec<String>,
}

impl Dmenu {
    pub fn new(interface: &InterfaceConfig) -> Self {
        Self {
            launcher: interface.launcher.clone(),
            extra_args: interface.dmenu_args.clone(),
        }
    }

    fn args<'a>(&'a self, prompt: &'a str) -> Vec<&'a str> {
        let mut args = vec!["-i", "-p", prompt];
        args.extend(self.extra_args.iter().map(String::as_str));
        args
    }

    /// Аргументы для свободного ввода: пользовательские `-i` и `-p <текст>`
    /// отбрасываются, чтобы не спорить с собственной подсказкой
    fn input_args<'a>(&'a self, prompt: &'a str) -> Vec<&'a str> {
        let mut args = vec!["-i", "-p", prompt];
        let mut extra = self.extra_args.iter();
        while let Some(arg) = extra.next() {
            match arg.as_str() {
                "-i" => {}
                "-p" => {
                    extra.next();
                }
                other => args.push(other),
            }
        }
        args
    }

    async fn run(&self, mut args: Vec<&str>, input: &str) -> Result<String> {
        if self.launcher == "rofi" {
            args.insert(0, "-dmenu");
        }

        // Ненулевой код возврата - меню закрыли по Escape. Ошибка запуска
        // (меню не установлено) остаётся ошибкой.
        let output = run_tool_with_input(&self.launcher, &args, Some(input))
            .await
            .map_err(|e| match e {
                RabbitError::ExternalTool { .. } => rabbit_error!(cancelled, "меню закрыто"),
                other => other,
            })?;

        let selected = output.trim().to_string();
        if selected.is_empty() {
            return Err(rabbit_error!(cancelled, "ничего не выбрано"));
        }
        Ok(selected)
    }
}

#[async_trait::async_trait]
impl Menu for Dmenu {
    async fn choose(&self, prompt: &str, options: &[String]) -> Result<String> {
        self.run(self.args(prompt), &options.join("\n")).await
    }

    async fn prompt(&self, prompt: &str) -> Result<String> {
        self.run(self.input_args(prompt), "").await
    }
}

/// Меню для --dry-run: выбирает первый пункт и вводит фиксированный запрос
pub struct DryRunMenu;

#[async_trait::async_trait]
impl Menu for DryRunMenu {
    async fn choose(&self, prompt: &str, options: &[String]) -> Result<String> {
        let choice = options
            .first()
            .cloned()
            .ok_or_else(|| rabbit_error!(cancelled, "пустое меню"))?;
        info!("Dry-run: меню '{}' -> {}", prompt, choice);
        Ok(choice)
    }

    async fn prompt(&self, prompt: &str) -> Result<String> {
        info!("Dry-run: ввод '{}'", prompt);
        Ok("dry run query".to_string())
    }
}

/// Factory function to create a menu based on the dry_run flag
pub fn create_menu(interface: &InterfaceConfig, dry_run: bool) -> Box<dyn Menu> {
    if dry_run {
        Box::new(DryRunMenu)
    } else {
        Box::new(Dmenu::new(interface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dmenu_args_append_configured_ones() {
        let interface = InterfaceConfig {
            launcher: "dmenu".to_string(),
            dmenu_args: vec!["-l".to_string(), "10".to_string()],
        };
        let menu = Dmenu::new(&interface);
        assert_eq!(menu.args("Search with:"), vec!["-i", "-p", "Search with:", "-l", "10"]);
    }

    #[test]
    fn input_args_drop_conflicting_prompt_flags() {
        let interface = InterfaceConfig {
            launcher: "dmenu".to_string(),
            dmenu_args: vec![
                "-i".to_string(),
                "-p".to_string(),
                "Search with:".to_string(),
                "-fn".to_string(),
                "mono-12".to_string(),
            ],
        };
        let menu = Dmenu::new(&interface);
        assert_eq!(
            menu.input_args("Enter search query:"),
            vec!["-i", "-p", "Enter search query:", "-fn", "mono-12"]
        );
    }

    #[tokio::test]
    async fn missing_launcher_is_an_error_not_a_cancel() {
        let interface = InterfaceConfig {
            launcher: "rabbithole-no-such-menu".to_string(),
            dmenu_args: Vec::new(),
        };
        let menu = Dmenu::new(&interface);
        let options = vec!["d: DuckDuckGo".to_string()];

        let err = menu.choose("Search with:", &options).await.unwrap_err();
        assert!(matches!(err, RabbitError::ToolNotStarted { ref tool, .. } if tool == "rabbithole-no-such-menu"));

        let err = menu.prompt("Enter search query:").await.unwrap_err();
        assert!(!matches!(err, RabbitError::Cancelled(_)));
    }

    #[tokio::test]
    async fn dry_run_menu_picks_first_option() {
        let options = vec!["d: DuckDuckGo".to_string(), "w: Wikipedia".to_string()];
        assert_eq!(DryRunMenu.choose("Search with:", &options).await.unwrap(), "d: DuckDuckGo");
        assert!(DryRunMenu.choose("Search with:", &[]).await.is_err());
    }
}
