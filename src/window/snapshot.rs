use super::WindowId;
use std::collections::HashSet;

/// Одна строка вывода утилиты списка окон
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedWindow {
    pub raw_id: String,
    pub title: String,
}

impl ListedWindow {
    pub fn new(raw_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            raw_id: raw_id.into(),
            title: title.into(),
        }
    }

    /// Разбирает строку вида `<id> <произвольный текст>`.
    /// Пустые строки пропускаются.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match line.split_once(char::is_whitespace) {
            Some((raw_id, rest)) => Some(Self::new(raw_id, rest.trim_start())),
            None => Some(Self::new(line, "")),
        }
    }

    pub fn id(&self) -> WindowId {
        WindowId::normalize(&self.raw_id)
    }
}

/// Множество окон, снятое в один момент времени.
///
/// Порядок вывода утилиты сохраняется, чтобы при появлении нескольких новых
/// окон выбиралось первое из перечисленных.
#[derive(Debug, Clone, Default)]
pub struct WindowSnapshot {
    order: Vec<WindowId>,
    members: HashSet<WindowId>,
}

impl WindowSnapshot {
    /// Окна, в заголовке которых встречается `app_signature`
    pub fn filtered(windows: &[ListedWindow], app_signature: &str) -> Self {
        windows
            .iter()
            .filter(|window| window.title.contains(app_signature))
            .map(ListedWindow::id)
            .collect()
    }

    /// Все окна без фильтрации
    pub fn unfiltered(windows: &[ListedWindow]) -> Self {
        windows.iter().map(ListedWindow::id).collect()
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Первое окно, которого не было в `before`
    pub fn first_new_since(&self, before: &WindowSnapshot) -> Option<&WindowId> {
        self.order.iter().find(|id| !before.contains(id))
    }
}

impl FromIterator<WindowId> for WindowSnapshot {
    fn from_iter<I: IntoIterator<Item = WindowId>>(iter: I) -> Self {
        let mut snapshot = Self::default();
        for id in iter {
            if snapshot.members.insert(id.clone()) {
                snapshot.order.push(id);
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WMCTRL_OUTPUT: &str = "\
0x01e00003  0 host Terminal
0x03a00003  0 host Rust - Mozilla Firefox
0x03a0000f  1 host Docs - Mozilla Firefox

";

    fn listing() -> Vec<ListedWindow> {
        WMCTRL_OUTPUT.lines().filter_map(ListedWindow::parse_line).collect()
    }

    #[test]
    fn parses_wmctrl_lines() {
        let windows = listing();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[1].raw_id, "0x03a00003");
        assert_eq!(windows[1].title, "0 host Rust - Mozilla Firefox");
    }

    #[test]
    fn line_without_title_keeps_id() {
        let window = ListedWindow::parse_line("  60817411 ").unwrap();
        assert_eq!(window.raw_id, "60817411");
        assert_eq!(window.title, "");
        assert_eq!(window.id().as_str(), "0x03a00003");
    }

    #[test]
    fn filtered_snapshot_keeps_matching_titles() {
        let snapshot = WindowSnapshot::filtered(&listing(), "Mozilla Firefox");
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&WindowId::normalize("60817411")));
        assert!(!snapshot.contains(&WindowId::normalize("0x01e00003")));
    }

    #[test]
    fn unfiltered_snapshot_keeps_everything() {
        let snapshot = WindowSnapshot::unfiltered(&listing());
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn duplicates_collapse_to_one_member() {
        let snapshot: WindowSnapshot = ["1", "0x00000001", "2"]
            .iter()
            .map(|raw| WindowId::normalize(raw))
            .collect();
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn first_new_follows_listing_order() {
        let before: WindowSnapshot = ["0x1", "0x2"].iter().map(|r| WindowId::normalize(r)).collect();
        let after: WindowSnapshot = ["0x2", "0x4", "0x1", "0x3"]
            .iter()
            .map(|r| WindowId::normalize(r))
            .collect();
        assert_eq!(after.first_new_since(&before).map(WindowId::as_str), Some("0x4"));
        assert_eq!(before.first_new_since(&before), None);
    }
}
