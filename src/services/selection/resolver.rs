use super::{SelectionCandidate, SelectionKind, SelectionPolicy, SelectionReader};
use crate::config::BehaviorConfig;
use crate::error::{RabbitError, Result};
use crate::rabbit_error;
use std::time::Duration;
use tracing::{debug, info};

/// Порядок опроса в режиме auto: PRIMARY (пассивное выделение) раньше CLIPBOARD,
/// в котором чаще лежит давно скопированный текст.
const AUTO_ORDER: [SelectionKind; 2] = [SelectionKind::Primary, SelectionKind::Clipboard];

const PREVIEW_CHARS: usize = 30;

pub struct SelectionResolver<'a> {
    reader: &'a dyn SelectionReader,
    timeout: Duration,
    log_selections: bool,
}

impl<'a> SelectionResolver<'a> {
    pub fn new(reader: &'a dyn SelectionReader, timeout: Duration, log_selections: bool) -> Self {
        Self {
            reader,
            timeout,
            log_selections,
        }
    }

    pub fn from_config(reader: &'a dyn SelectionReader, behavior: &BehaviorConfig) -> Self {
        Self::new(
            reader,
            Duration::from_millis(behavior.selection_timeout_ms),
            behavior.log_selections,
        )
    }

    /// Получает текст запроса согласно политике.
    ///
    /// Ошибки `ManualOnly`, `SelectionEmpty` и `NoSelectionAvailable` штатные:
    /// вызывающий переходит к ручному вводу.
    pub async fn capture(&self, policy: SelectionPolicy) -> Result<SelectionCandidate> {
        match policy {
            SelectionPolicy::Manual => Err(RabbitError::ManualOnly),
            SelectionPolicy::Primary => self.capture_from(SelectionKind::Primary).await,
            SelectionPolicy::Clipboard => self.capture_from(SelectionKind::Clipboard).await,
            SelectionPolicy::Auto => {
                for kind in AUTO_ORDER {
                    match self.capture_from(kind).await {
                        Ok(candidate) => return Ok(candidate),
                        Err(e) => debug!("{} не дал текста: {}", kind, e),
                    }
                }
                Err(RabbitError::NoSelectionAvailable)
            }
        }
    }

    /// Читает один буфер с ограничением по времени
    pub async fn capture_from(&self, kind: SelectionKind) -> Result<SelectionCandidate> {
        let raw = tokio::time::timeout(self.timeout, self.reader.read(kind))
            .await
            .map_err(|_| rabbit_error!(timeout, "чтение {} дольше {:?}", kind, self.timeout))??;

        let text = raw.trim();
        if text.is_empty() {
            return Err(RabbitError::SelectionEmpty(kind));
        }

        let chars = text.chars().count();
        if self.log_selections {
            let preview: String = text.chars().take(PREVIEW_CHARS).collect();
            info!("Захвачено из {} ({} символов): {}...", kind, chars, preview);
        } else {
            info!("Захвачено из {} ({} символов)", kind, chars);
        }

        Ok(SelectionCandidate {
            source: kind.into(),
            text: text.to_string(),
        })
    }
}
