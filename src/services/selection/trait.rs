use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Буфер выделения X11
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// Заполняется простым выделением текста
    Primary,
    /// Заполняется только явным копированием
    Clipboard,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Primary => f.write_str("PRIMARY"),
            SelectionKind::Clipboard => f.write_str("CLIPBOARD"),
        }
    }
}

/// Политика захвата запроса из выделения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    Manual,
    Primary,
    Clipboard,
    #[default]
    Auto,
}

/// Откуда взят текст запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    PrimarySelection,
    ClipboardSelection,
    Manual,
}

impl SelectionSource {
    /// Значение колонки trigger_method в истории поиска
    pub fn trigger_method(self) -> &'static str {
        match self {
            SelectionSource::PrimarySelection | SelectionSource::ClipboardSelection => "selection",
            SelectionSource::Manual => "manual",
        }
    }
}

impl From<SelectionKind> for SelectionSource {
    fn from(kind: SelectionKind) -> Self {
        match kind {
            SelectionKind::Primary => SelectionSource::PrimarySelection,
            SelectionKind::Clipboard => SelectionSource::ClipboardSelection,
        }
    }
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSource::PrimarySelection => f.write_str("primary-selection"),
            SelectionSource::ClipboardSelection => f.write_str("clipboard-selection"),
            SelectionSource::Manual => f.write_str("manual"),
        }
    }
}

/// Обрезанный непустой текст запроса и его источник
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCandidate {
    pub source: SelectionSource,
    pub text: String,
}

/// Чтение буферов выделения
#[async_trait::async_trait]
pub trait SelectionReader: Send + Sync {
    /// Сырое содержимое буфера; ошибка, если буфер недоступен
    async fn read(&self, kind: SelectionKind) -> Result<String>;
}

/// Factory function to create a selection reader based on the dry_run flag
pub fn create_selection_reader(dry_run: bool) -> Box<dyn SelectionReader> {
    if dry_run {
        Box::new(super::dry_run::DryRunSelection::new(
            "dry run selection",
            "",
        ))
    } else {
        Box::new(super::xsel::XselReader::new())
    }
}
