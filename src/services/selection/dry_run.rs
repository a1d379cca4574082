use super::{SelectionKind, SelectionReader};
use crate::error::{RabbitError, Result};
use parking_lot::Mutex;
use tracing::info;

/// Буферы выделения в памяти. Пустая строка означает недоступный буфер.
pub struct DryRunSelection {
    primary: Mutex<String>,
    clipboard: Mutex<String>,
}

impl DryRunSelection {
    pub fn new(primary: impl Into<String>, clipboard: impl Into<String>) -> Self {
        Self {
            primary: Mutex::new(primary.into()),
            clipboard: Mutex::new(clipboard.into()),
        }
    }

    #[cfg(test)]
    pub fn set(&self, kind: SelectionKind, text: impl Into<String>) {
        match kind {
            SelectionKind::Primary => *self.primary.lock() = text.into(),
            SelectionKind::Clipboard => *self.clipboard.lock() = text.into(),
        }
    }
}

#[async_trait::async_trait]
impl SelectionReader for DryRunSelection {
    async fn read(&self, kind: SelectionKind) -> Result<String> {
        let text = match kind {
            SelectionKind::Primary => self.primary.lock().clone(),
            SelectionKind::Clipboard => self.clipboard.lock().clone(),
        };

        info!("Dry-run: чтение {} ({} символов)", kind, text.chars().count());

        if text.is_empty() {
            return Err(RabbitError::external("xsel", format!("{} недоступен", kind)));
        }
        Ok(text)
    }
}
