use crate::config::SearchEngine;
use crate::context::AppContext;
use crate::error::{RabbitError, Result};
use crate::rabbit_error;
use crate::services::selection::{SelectionCandidate, SelectionResolver, SelectionSource};
use crate::services::tracking::{Lifecycle, OpenOutcome};
use crate::store::SearchRecord;
use tracing::{info, warn};

const ENGINE_PROMPT: &str = "Search with:";
const QUERY_PROMPT: &str = "Enter search query:";

/// Поиск: запрос из выделения (или вручную), выбор поисковика, окно сбоку
pub async fn run(ctx: &AppContext, empty: bool) -> Result<OpenOutcome> {
    let captured = if empty {
        None
    } else {
        capture_query(ctx).await?
    };

    let engine = choose_engine(ctx).await?;

    let candidate = match captured {
        Some(candidate) => candidate,
        None => prompt_query(ctx).await?,
    };

    let record = SearchRecord {
        query: candidate.text.clone(),
        engine_name: engine.name.clone(),
        engine_url: engine.url.clone(),
        trigger_method: candidate.source.trigger_method().to_string(),
    };
    if let Err(e) = ctx.db.history().log(&record) {
        warn!("Не удалось записать поиск в историю: {}", e);
    }

    let url = engine.build_url(&candidate.text);
    info!("Поиск '{}' через {} ({})", candidate.text, engine.name, candidate.source);

    Lifecycle::new(ctx).open_and_track(&url).await
}

/// Штатные неудачи захвата дают `None` и переход к ручному вводу
async fn capture_query(ctx: &AppContext) -> Result<Option<SelectionCandidate>> {
    let behavior = &ctx.config.behavior;
    let resolver = SelectionResolver::from_config(ctx.selection.as_ref(), behavior);

    match resolver.capture(behavior.selection_method).await {
        Ok(candidate) => Ok(Some(candidate)),
        Err(e) if e.is_expected_capture_failure() => {
            info!("Выделение не получено ({}), переходим к ручному вводу", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

async fn choose_engine(ctx: &AppContext) -> Result<SearchEngine> {
    let engines = &ctx.config.search_engines;
    if engines.is_empty() {
        return Err(rabbit_error!(config, "не настроено ни одного поисковика"));
    }

    let options: Vec<String> = engines.iter().map(SearchEngine::menu_label).collect();
    let selected = ctx.menu.choose(ENGINE_PROMPT, &options).await?;

    resolve_engine(ctx, &selected).cloned()
}

/// Пункт меню `k: Name` или просто `k`
fn resolve_engine<'a>(ctx: &'a AppContext, selected: &str) -> Result<&'a SearchEngine> {
    let key = selected.split(':').next().unwrap_or_default().trim();
    ctx.config
        .find_engine(key)
        .ok_or_else(|| RabbitError::InvalidInput(format!("неизвестный поисковик: {}", selected)))
}

async fn prompt_query(ctx: &AppContext) -> Result<SelectionCandidate> {
    let text = ctx.menu.prompt(QUERY_PROMPT).await?;
    let text = text.trim();
    if text.is_empty() {
        return Err(rabbit_error!(cancelled, "пустой запрос"));
    }

    Ok(SelectionCandidate {
        source: SelectionSource::Manual,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::menu::Menu;
    use crate::services::selection::{DryRunSelection, SelectionPolicy};
    use crate::services::window_tools::{Desktop, DryRunDesktop};
    use crate::store::Database;
    use std::sync::Arc;

    /// Меню, которое выбирает пункт по ключу и вводит заданный запрос
    struct ScriptedMenu {
        key: &'static str,
        query: &'static str,
    }

    #[async_trait::async_trait]
    impl Menu for ScriptedMenu {
        async fn choose(&self, _prompt: &str, options: &[String]) -> Result<String> {
            options
                .iter()
                .find(|option| option.starts_with(self.key))
                .cloned()
                .ok_or_else(|| rabbit_error!(cancelled, "нет пункта"))
        }

        async fn prompt(&self, _prompt: &str) -> Result<String> {
            Ok(self.query.to_string())
        }
    }

    fn context(
        desktop: &Arc<DryRunDesktop>,
        selection: DryRunSelection,
        menu: ScriptedMenu,
    ) -> AppContext {
        AppContext::new(
            Config::default(),
            Database::open_in_memory().unwrap(),
            Desktop::from_shared(desktop.clone()),
            Box::new(selection),
            Box::new(menu),
        )
    }

    fn firefox() -> Arc<DryRunDesktop> {
        Arc::new(DryRunDesktop::new("Mozilla Firefox"))
    }

    #[tokio::test(start_paused = true)]
    async fn selection_query_opens_tracked_window() {
        let desktop = firefox();
        let ctx = context(
            &desktop,
            DryRunSelection::new("  rust ownership \n", ""),
            ScriptedMenu { key: "w", query: "unused" },
        );

        let outcome = run(&ctx, false).await.unwrap();

        assert!(matches!(outcome, OpenOutcome::Tracked(_)));
        assert_eq!(
            desktop.launched(),
            vec!["https://en.wikipedia.org/w/index.php?search=rust+ownership".to_string()]
        );

        let history = ctx.db.history().recent(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].record.query, "rust ownership");
        assert_eq!(history[0].record.engine_name, "Wikipedia");
        assert_eq!(history[0].record.trigger_method, "selection");
    }

    #[tokio::test(start_paused = true)]
    async fn missing_selection_falls_back_to_manual_query() {
        let desktop = firefox();
        let ctx = context(
            &desktop,
            DryRunSelection::new("", "   "),
            ScriptedMenu { key: "d", query: "tokio select" },
        );

        run(&ctx, false).await.unwrap();

        assert_eq!(
            desktop.launched(),
            vec!["https://duckduckgo.com/?q=tokio+select".to_string()]
        );
        let history = ctx.db.history().recent(1).unwrap();
        assert_eq!(history[0].record.trigger_method, "manual");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_flag_skips_selection() {
        let desktop = firefox();
        let ctx = context(
            &desktop,
            DryRunSelection::new("selected text", ""),
            ScriptedMenu { key: "d", query: "typed" },
        );

        run(&ctx, true).await.unwrap();

        assert_eq!(desktop.launched(), vec!["https://duckduckgo.com/?q=typed".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_policy_never_reads_selection() {
        let desktop = firefox();
        let mut ctx = context(
            &desktop,
            DryRunSelection::new("selected text", ""),
            ScriptedMenu { key: "d", query: "typed" },
        );
        ctx.config.behavior.selection_method = SelectionPolicy::Manual;

        run(&ctx, false).await.unwrap();

        let history = ctx.db.history().recent(1).unwrap();
        assert_eq!(history[0].record.query, "typed");
    }

    #[tokio::test(start_paused = true)]
    async fn blank_manual_query_is_cancelled() {
        let desktop = firefox();
        let ctx = context(
            &desktop,
            DryRunSelection::new("", ""),
            ScriptedMenu { key: "d", query: "   " },
        );

        let err = run(&ctx, false).await.unwrap_err();

        assert!(matches!(err, RabbitError::Cancelled(_)));
        assert!(desktop.launched().is_empty());
        assert!(ctx.db.history().recent(10).unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_engine_choice_is_rejected() {
        let desktop = firefox();
        let ctx = context(
            &desktop,
            DryRunSelection::new("query", ""),
            ScriptedMenu { key: "d", query: "" },
        );

        assert!(resolve_engine(&ctx, "x: Nothing").is_err());
        assert_eq!(resolve_engine(&ctx, "w").unwrap().name, "Wikipedia");
        assert_eq!(resolve_engine(&ctx, "d: DuckDuckGo").unwrap().name, "DuckDuckGo");
    }
}
