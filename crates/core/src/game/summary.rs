use crate::model::RoundRecord;

/// Index of the WIN record with the smallest elapsed time; the earliest one on ties.
fn fastest_win_index(records: &[RoundRecord]) -> Option<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_win())
        .min_by_key(|(_, r)| r.elapsed_ms())
        .map(|(i, _)| i)
}

/// What the result screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    total_score: u32,
    records: Vec<RoundRecord>,
    fastest: Option<usize>,
}

impl SessionSummary {
    #[must_use]
    pub fn from_records(records: &[RoundRecord]) -> Self {
        Self {
            total_score: records.iter().map(RoundRecord::score).sum(),
            records: records.to_vec(),
            fastest: fastest_win_index(records),
        }
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// Fastest correct answer, or `None` when no round was won.
    #[must_use]
    pub fn fastest(&self) -> Option<&RoundRecord> {
        self.fastest.and_then(|i| self.records.get(i))
    }

    #[must_use]
    pub fn fastest_index(&self) -> Option<usize> {
        self.fastest
    }

    #[must_use]
    pub fn wins(&self) -> usize {
        self.records.iter().filter(|r| r.is_win()).count()
    }

    #[must_use]
    pub fn losses(&self) -> usize {
        self.records.len() - self.wins()
    }
}
