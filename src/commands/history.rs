use crate::context::AppContext;
use crate::error::Result;
use crate::store::history::LoggedSearch;

pub fn show(ctx: &AppContext, limit: usize) -> Result<()> {
    let searches = ctx.db.history().recent(limit)?;
    if searches.is_empty() {
        println!("История поиска пуста.");
        return Ok(());
    }

    // Сессия - день, записи внутри идут от новых к старым
    let mut session: Option<&str> = None;
    for search in &searches {
        if session != Some(search.session_id.as_str()) {
            println!("\n{}", search.session_id);
            session = Some(search.session_id.as_str());
        }
        println!("  {}", format_entry(search));
    }
    Ok(())
}

fn format_entry(search: &LoggedSearch) -> String {
    let record = &search.record;
    format!(
        "{}  [{}] {} ({})",
        search.timestamp, record.engine_name, record.query, record.trigger_method
    )
}
