use std::sync::Arc;

use guess_core::model::{Item, ItemId, Locale};

/// Most candidates offered for one query.
pub const MAX_CANDIDATES: usize = 8;

/// Free-text search over the catalog that feeds guesses to the game.
///
/// Matching is a case-insensitive substring test against both localized
/// names. The selection cursor wraps in both directions.
#[derive(Debug, Clone)]
pub struct PredictionSearch {
    catalog: Arc<[Item]>,
    locale: Locale,
    query: String,
    candidates: Vec<usize>,
    selected: usize,
}

impl PredictionSearch {
    #[must_use]
    pub fn new(catalog: impl Into<Arc<[Item]>>, locale: Locale) -> Self {
        Self {
            catalog: catalog.into(),
            locale,
            query: String::new(),
            candidates: Vec::new(),
            selected: 0,
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and recompute candidates. The cursor returns to the top.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = 0;
        self.candidates = self.matching_indices();
    }

    pub fn clear(&mut self) {
        self.set_query(String::new());
    }

    /// Current candidates, best first.
    #[must_use]
    pub fn candidates(&self) -> Vec<&Item> {
        self.candidates.iter().map(|&i| &self.catalog[i]).collect()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        (!self.candidates.is_empty()).then_some(self.selected)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.candidates
            .get(self.selected)
            .map(|&i| &self.catalog[i])
    }

    pub fn select_next(&mut self) {
        let len = self.candidates.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.candidates.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Moves the cursor to `index` if it points at a candidate.
    pub fn select(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.selected = index;
        }
    }

    /// Confirms the selected candidate, returning its id and clearing the query.
    ///
    /// Returns `None` and keeps the query when there is nothing to confirm.
    pub fn confirm(&mut self) -> Option<ItemId> {
        let id = self.selected()?.id().clone();
        self.clear();
        Some(id)
    }

    /// Label pair for a candidate: the target-locale name and the other one.
    #[must_use]
    pub fn labels<'a>(&self, item: &'a Item) -> (&'a str, &'a str) {
        (item.name(self.locale), item.other_name(self.locale))
    }

    fn matching_indices(&self) -> Vec<usize> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.catalog
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                item.name_jp().to_lowercase().contains(&needle)
                    || item.name_kr().to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .take(MAX_CANDIDATES)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guess_core::model::ItemDraft;
    use guess_core::time::fixed_now;

    fn item(id: &str, jp: &str, kr: &str) -> Item {
        ItemDraft::new(id, jp, kr, "a.png").validate(fixed_now()).unwrap()
    }

    fn search() -> PredictionSearch {
        let catalog = vec![
            item("1", "Summer Aya", "여름 아야"),
            item("2", "Winter Aya", "겨울 아야"),
            item("3", "ナディン", "나딘"),
        ];
        PredictionSearch::new(catalog, Locale::Kr)
    }

    #[test]
    fn matches_either_name_ignoring_case() {
        let mut s = search();
        s.set_query("aya");
        assert_eq!(s.candidates().len(), 2);
        s.set_query("나딘");
        assert_eq!(s.candidates()[0].id().as_str(), "3");
        s.set_query("   ");
        assert!(s.candidates().is_empty());
        assert_eq!(s.selected_index(), None);
    }

    #[test]
    fn caps_candidates_at_eight() {
        let catalog: Vec<Item> = (0..12)
            .map(|i| item(&i.to_string(), &format!("Skin {i}"), &format!("스킨 {i}")))
            .collect();
        let mut s = PredictionSearch::new(catalog, Locale::Jp);
        s.set_query("skin");
        assert_eq!(s.candidates().len(), MAX_CANDIDATES);
        assert_eq!(s.candidates()[0].id().as_str(), "0");
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut s = search();
        s.set_query("aya");
        s.select_previous();
        assert_eq!(s.selected_index(), Some(1));
        s.select_next();
        assert_eq!(s.selected_index(), Some(0));
        s.select(5);
        assert_eq!(s.selected_index(), Some(0));
    }

    #[test]
    fn confirm_emits_id_and_clears() {
        let mut s = search();
        assert_eq!(s.confirm(), None);

        s.set_query("AYA");
        s.select_next();
        assert_eq!(s.confirm(), Some(ItemId::new("2").unwrap()));
        assert_eq!(s.query(), "");
        assert!(s.candidates().is_empty());
    }

    #[test]
    fn labels_follow_target_locale() {
        let s = search();
        let aya = item("1", "Summer Aya", "여름 아야");
        assert_eq!(s.labels(&aya), ("여름 아야", "Summer Aya"));
    }
}
