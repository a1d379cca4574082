use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::{error, info, warn};
mod commands;
mod config;
mod context;
mod error;
mod services;
mod store;
mod utils;
mod window;

use config::Config;
use context::AppContext;
use error::RabbitError;
use services::tracking::{CloseOutcome, OpenOutcome};

#[derive(Parser, Debug)]
#[command(name = "rabbithole", version)]
#[command(about = "Поиск выделенного текста в боковом окне браузера")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long, global = true)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Искать выделенный текст (или введённый вручную)
    Search {
        /// Не читать выделение, сразу спросить запрос
        #[arg(short, long)]
        empty: bool,
    },
    /// Закрыть активное окно, если оно исследовательское
    Close,
    /// Удалить из реестра записи о закрытых окнах
    Cleanup,
    /// Показать отслеживаемые окна
    Tracked,
    /// Показать последние поисковые запросы
    History {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// Показать настроенные поисковики
    ListEngines,
    /// Добавить поисковик
    AddEngine { name: String, url: String, key: String },
    /// Удалить поисковик по ключу
    RemoveEngine { key: String },
    /// Изменить поисковик
    EditEngine {
        key: String,
        name: String,
        url: String,
        new_key: String,
    },
    /// Показать текущие выделения X11
    DebugSelections,
    /// Проверить утилиты и настроить горячие клавиши sxhkd
    Setup,
}

impl Command {
    /// Команды, которым нужны хранилище и внешние утилиты
    fn needs_context(&self) -> bool {
        matches!(
            self,
            Command::Search { .. }
                | Command::Close
                | Command::Cleanup
                | Command::Tracked
                | Command::History { .. }
                | Command::DebugSelections
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => utils::paths::config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("не удалось загрузить конфигурацию {:?}", config_path))?;

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, config.logging.to_file && !args.dry_run)?;

    info!("Запуск rabbithole v{}: {:?}", env!("CARGO_PKG_VERSION"), args.command);
    info!("Конфигурация загружена из: {:?}", config_path);

    match run(args.command, config, args.dry_run).await {
        Ok(()) => Ok(()),
        Err(RabbitError::Cancelled(reason)) => {
            info!("Отменено пользователем: {}", reason);
            Ok(())
        }
        Err(e) => {
            error!("Команда завершилась с ошибкой: {}", e);
            Err(e.into())
        }
    }
}

async fn run(command: Command, mut config: Config, dry_run: bool) -> error::Result<()> {
    if !command.needs_context() {
        return match command {
            Command::ListEngines => {
                commands::engines::list(&config);
                Ok(())
            }
            Command::AddEngine { name, url, key } => {
                commands::engines::add(&mut config, &name, &url, &key)
            }
            Command::RemoveEngine { key } => commands::engines::remove(&mut config, &key),
            Command::EditEngine {
                key,
                name,
                url,
                new_key,
            } => commands::engines::edit(&mut config, &key, &name, &url, &new_key),
            Command::Setup => commands::setup::run().await,
            other => Err(RabbitError::Internal(format!("команда {:?} требует контекста", other))),
        };
    }

    let ctx = AppContext::build(config, dry_run)?;

    match command {
        Command::Search { empty } => match commands::search::run(&ctx, empty).await? {
            OpenOutcome::Tracked(id) => info!("Поиск открыт в окне {}", id),
            OpenOutcome::Untracked => warn!("Поиск открыт, но окно не отслеживается"),
        },
        Command::Close => match commands::windows::close(&ctx).await? {
            CloseOutcome::Closed { .. } => {}
            CloseOutcome::NotTracked(id) => info!("Окно {} не исследовательское", id),
            CloseOutcome::NoActiveWindow => info!("Активного окна нет"),
        },
        Command::Cleanup => {
            commands::windows::cleanup(&ctx).await?;
        }
        Command::Tracked => commands::windows::tracked(&ctx)?,
        Command::History { limit } => commands::history::show(&ctx, limit)?,
        Command::DebugSelections => commands::diagnostics::debug_selections(&ctx).await,
        other => {
            return Err(RabbitError::Internal(format!(
                "команда {:?} не требует контекста",
                other
            )))
        }
    }

    Ok(())
}

fn init_tracing(level: &str, to_file: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // Горячие клавиши запускают нас без терминала, поэтому по умолчанию пишем в файл
    let mut open_failure = None;
    let log_file = if to_file {
        let opened = utils::paths::log_path().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(RabbitError::from)
        });
        match opened {
            Ok(file) => Some(file),
            Err(e) => {
                open_failure = Some(e);
                None
            }
        }
    } else {
        None
    };

    let (file_layer, stderr_layer) = match log_file {
        Some(file) => (
            Some(fmt::layer().with_target(false).with_writer(std::sync::Mutex::new(file))),
            None,
        ),
        None => (None, Some(fmt::layer().compact().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    if let Some(e) = open_failure {
        warn!("Не удалось открыть файл лога, пишем в stderr: {}", e);
    }

    Ok(())
}
