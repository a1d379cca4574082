use crate::context::AppContext;
use crate::error::Result;
use crate::rabbit_error;
use crate::services::selection::SelectionKind;
use std::time::Duration;

/// Печатает текущее содержимое PRIMARY и CLIPBOARD
pub async fn debug_selections(ctx: &AppContext) {
    let timeout = Duration::from_millis(ctx.config.behavior.selection_timeout_ms);

    println!("Текущие выделения X11:");
    println!("======================");

    for kind in [SelectionKind::Primary, SelectionKind::Clipboard] {
        let reading = tokio::time::timeout(timeout, ctx.selection.read(kind))
            .await
            .unwrap_or_else(|_| Err(rabbit_error!(timeout, "чтение дольше {:?}", timeout)));
        println!("{}", describe_reading(kind, reading));
    }
}

fn describe_reading(kind: SelectionKind, reading: Result<String>) -> String {
    let label = format!("{}:", kind);
    match reading {
        Ok(raw) if !raw.trim().is_empty() => {
            let text = raw.trim();
            format!("{:<11}'{}' ({} символов)", label, text, text.chars().count())
        }
        Ok(_) => format!("{:<11}(пусто)", label),
        Err(e) => format!("{:<11}(ошибка: {})", label, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RabbitError;

    #[test]
    fn test_describe_reading() {
        assert_eq!(
            describe_reading(SelectionKind::Primary, Ok("  héllo \n".to_string())),
            "PRIMARY:   'héllo' (5 символов)"
        );
        assert_eq!(
            describe_reading(SelectionKind::Clipboard, Ok("   ".to_string())),
            "CLIPBOARD: (пусто)"
        );

        let failed = describe_reading(
            SelectionKind::Clipboard,
            Err(RabbitError::external("xsel", "нет дисплея")),
        );
        assert!(failed.starts_with("CLIPBOARD: (ошибка:"));
    }
}
