use super::SnapshotSource;
use crate::error::Result;
use crate::store::ResearchRegistry;
use tracing::{info, warn};

/// Сверяет реестр с живым списком окон и удаляет записи мёртвых окон.
/// Живые окна никогда не трогает.
pub struct Reconciler<'a> {
    registry: &'a ResearchRegistry<'a>,
    source: SnapshotSource<'a>,
}

impl<'a> Reconciler<'a> {
    pub fn new(registry: &'a ResearchRegistry<'a>, source: SnapshotSource<'a>) -> Self {
        Self { registry, source }
    }

    /// Возвращает количество удалённых записей
    pub async fn reconcile(&self) -> Result<usize> {
        let tracked = self.registry.list_all()?;
        if tracked.is_empty() {
            return Ok(0);
        }

        // Полный список: отслеживаемое окно могло сменить заголовок
        let live = self.source.live().await?;

        let mut removed = 0;
        for id in tracked.iter().filter(|id| !live.contains(id)) {
            match self.registry.remove(id) {
                Ok(_) => {
                    info!("Удалено мёртвое исследовательское окно: {}", id);
                    removed += 1;
                }
                Err(e) => warn!("Не удалось удалить мёртвое окно {}: {}", id, e),
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RabbitError;
    use crate::services::window_tools::WindowLister;
    use crate::store::Database;
    use crate::window::{ListedWindow, WindowId};

    struct FixedLister(Option<Vec<&'static str>>);

    #[async_trait::async_trait]
    impl WindowLister for FixedLister {
        async fn list_windows(&self) -> Result<Vec<ListedWindow>> {
            match &self.0 {
                Some(ids) => Ok(ids
                    .iter()
                    .map(|raw| ListedWindow::new(*raw, "0 host anything"))
                    .collect()),
                None => Err(RabbitError::external("wmctrl", "недоступен")),
            }
        }
    }

    fn id(raw: &str) -> WindowId {
        WindowId::normalize(raw)
    }

    #[tokio::test]
    async fn prunes_only_dead_entries() {
        let db = Database::open_in_memory().unwrap();
        let registry = db.registry();
        for raw in ["0xa", "0xb", "0xc"] {
            registry.track(&id(raw)).unwrap();
        }

        let lister = FixedLister(Some(vec!["0xb", "0xd"]));
        let removed = Reconciler::new(&registry, SnapshotSource::new(&lister))
            .reconcile()
            .await
            .unwrap();

        assert_eq!(removed, 2);
        let remaining: Vec<WindowId> = registry.list_all().unwrap().into_iter().collect();
        assert_eq!(remaining, vec![id("0xb")]);
    }

    #[tokio::test]
    async fn compares_canonical_forms() {
        let db = Database::open_in_memory().unwrap();
        let registry = db.registry();
        registry.track(&id("60817411")).unwrap();

        let lister = FixedLister(Some(vec!["0x03a00003"]));
        let removed = Reconciler::new(&registry, SnapshotSource::new(&lister))
            .reconcile()
            .await
            .unwrap();

        assert_eq!(removed, 0);
        assert!(registry.contains(&id("0x03a00003")).unwrap());
    }

    #[tokio::test]
    async fn listing_failure_leaves_registry_intact() {
        let db = Database::open_in_memory().unwrap();
        let registry = db.registry();
        registry.track(&id("0xa")).unwrap();

        let lister = FixedLister(None);
        let result = Reconciler::new(&registry, SnapshotSource::new(&lister))
            .reconcile()
            .await;

        assert!(matches!(result, Err(RabbitError::ExternalTool { .. })));
        assert!(registry.contains(&id("0xa")).unwrap());
    }

    #[tokio::test]
    async fn empty_registry_skips_listing() {
        let db = Database::open_in_memory().unwrap();
        let registry = db.registry();

        let lister = FixedLister(None);
        let removed = Reconciler::new(&registry, SnapshotSource::new(&lister))
            .reconcile()
            .await
            .unwrap();
        assert_eq!(removed, 0);
    }
}
