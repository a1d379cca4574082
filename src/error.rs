use crate::services::selection::SelectionKind;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RabbitError {
    #[error("Ошибка конфигурации: {0}")]
    Config(String),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка хранилища: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Утилита {tool} завершилась с ошибкой: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("Не удалось запустить {tool}: {message}")]
    ToolNotStarted { tool: String, message: String },

    #[error("Таймаут: {0}")]
    Timeout(String),

    #[error("Выделение {0} пустое")]
    SelectionEmpty(SelectionKind),

    #[error("Нет текста ни в PRIMARY, ни в CLIPBOARD")]
    NoSelectionAvailable,

    #[error("Выбран ручной ввод запроса")]
    ManualOnly,

    #[error("Новое окно не появилось за {0:?}")]
    DetectionTimeout(Duration),

    #[error("Отменено: {0}")]
    Cancelled(String),

    #[error("Некорректный ввод: {0}")]
    InvalidInput(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl RabbitError {
    pub fn external(tool: impl Into<String>, message: impl Into<String>) -> Self {
        RabbitError::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn not_started(tool: impl Into<String>, message: impl Into<String>) -> Self {
        RabbitError::ToolNotStarted {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Ожидаемые исходы захвата выделения: вызывающий переходит к ручному вводу
    pub fn is_expected_capture_failure(&self) -> bool {
        matches!(
            self,
            RabbitError::SelectionEmpty(_)
                | RabbitError::NoSelectionAvailable
                | RabbitError::ManualOnly
                | RabbitError::Timeout(_)
                | RabbitError::ExternalTool { .. }
                | RabbitError::ToolNotStarted { .. }
        )
    }
}

impl From<figment::Error> for RabbitError {
    fn from(err: figment::Error) -> Self {
        RabbitError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RabbitError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! rabbit_error {
    (config, $($arg:tt)*) => {
        $crate::error::RabbitError::Config(format!($($arg)*))
    };
    (timeout, $($arg:tt)*) => {
        $crate::error::RabbitError::Timeout(format!($($arg)*))
    };
    (cancelled, $($arg:tt)*) => {
        $crate::error::RabbitError::Cancelled(format!($($arg)*))
    };
    (invalid_input, $($arg:tt)*) => {
        $crate::error::RabbitError::InvalidInput(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::RabbitError::Internal(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_outcomes_are_expected() {
        assert!(RabbitError::ManualOnly.is_expected_capture_failure());
        assert!(RabbitError::NoSelectionAvailable.is_expected_capture_failure());
        assert!(RabbitError::SelectionEmpty(SelectionKind::Primary).is_expected_capture_failure());
        assert!(RabbitError::not_started("xsel", "No such file or directory").is_expected_capture_failure());
        assert!(!RabbitError::Internal("x".into()).is_expected_capture_failure());
    }

    #[test]
    fn macro_builds_variants() {
        let err = rabbit_error!(invalid_input, "ключ {}", "ab");
        assert!(matches!(err, RabbitError::InvalidInput(ref m) if m == "ключ ab"));
    }
}
