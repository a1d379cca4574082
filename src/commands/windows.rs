use crate::context::AppContext;
use crate::error::Result;
use crate::services::tracking::{CloseOutcome, Lifecycle};
use crate::store::{unix_now, RegistryEntry};

/// Закрыть активное окно, если оно исследовательское
pub async fn close(ctx: &AppContext) -> Result<CloseOutcome> {
    let outcome = Lifecycle::new(ctx).close_if_tracked().await?;
    if let CloseOutcome::Closed { id, title } = &outcome {
        println!("Закрыто: {} {}", id, title);
    }
    Ok(outcome)
}

pub async fn cleanup(ctx: &AppContext) -> Result<usize> {
    let removed = Lifecycle::new(ctx).cleanup().await?;
    println!("Удалено мёртвых записей: {}", removed);
    Ok(removed)
}

pub fn tracked(ctx: &AppContext) -> Result<()> {
    let entries = ctx.db.registry().entries()?;
    if entries.is_empty() {
        println!("Нет отслеживаемых окон.");
        return Ok(());
    }

    let now = unix_now();
    println!("Отслеживаемые окна ({}):", entries.len());
    for entry in &entries {
        println!("  {}", describe(entry, now));
    }
    Ok(())
}

fn describe(entry: &RegistryEntry, now: i64) -> String {
    format!("{}  открыто {} назад", entry.id, format_age(now - entry.created_at))
}

fn format_age(seconds: i64) -> String {
    let seconds = seconds.max(0);
    match seconds {
        s if s < 60 => format!("{}с", s),
        s if s < 3600 => format!("{}м", s / 60),
        s if s < 86_400 => format!("{}ч", s / 3600),
        s => format!("{}д", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowId;

    #[test]
    fn test_format_age_units() {
        assert_eq!(format_age(-5), "0с");
        assert_eq!(format_age(59), "59с");
        assert_eq!(format_age(61), "1м");
        assert_eq!(format_age(7200), "2ч");
        assert_eq!(format_age(3 * 86_400 + 10), "3д");
    }

    #[test]
    fn test_describe_entry() {
        let entry = RegistryEntry {
            id: WindowId::normalize("0x04400001"),
            created_at: 1_000,
        };
        assert_eq!(describe(&entry, 1_090), "0x04400001  открыто 1м назад");
    }
}
