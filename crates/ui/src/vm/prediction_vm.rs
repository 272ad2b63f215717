use services::PredictionSearch;

/// One row of the candidate list under the prediction input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateVm {
    pub index: usize,
    /// Name in the session's target language.
    pub label: String,
    pub sub_label: String,
    pub selected: bool,
}

#[must_use]
pub fn map_candidates(search: &PredictionSearch) -> Vec<CandidateVm> {
    let selected = search.selected_index();
    search
        .candidates()
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let (label, sub_label) = search.labels(item);
            CandidateVm {
                index,
                label: label.to_string(),
                sub_label: sub_label.to_string(),
                selected: selected == Some(index),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use guess_core::model::{ItemDraft, Locale};
    use guess_core::time::fixed_now;

    #[test]
    fn marks_selected_candidate_and_uses_target_names() {
        let catalog = vec![
            ItemDraft::new("1", "夏アヤ", "여름 아야", "a.png")
                .validate(fixed_now())
                .unwrap(),
            ItemDraft::new("2", "冬アヤ", "겨울 아야", "b.png")
                .validate(fixed_now())
                .unwrap(),
        ];
        let mut search = PredictionSearch::new(catalog, Locale::Kr);
        search.set_query("아야");
        search.select_next();

        let rows = map_candidates(&search);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "여름 아야");
        assert_eq!(rows[0].sub_label, "夏アヤ");
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[test]
    fn empty_query_has_no_rows() {
        let search = PredictionSearch::new(Vec::new(), Locale::Jp);
        assert!(map_candidates(&search).is_empty());
    }
}
