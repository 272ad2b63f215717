use rand::Rng;
use rand::seq::index;

use crate::clock::RoundClock;
use crate::game::event::{Feedback, RoundToken};
use crate::model::{Item, Locale, RoundRecord};
use crate::rules::GameRules;

/// One play-through: the drawn rounds and everything accumulated so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    serial: u64,
    locale: Locale,
    rounds: Vec<Item>,
    round: usize,
    score: u32,
    clock: RoundClock,
    feedback: Option<Feedback>,
    records: Vec<RoundRecord>,
}

impl Session {
    /// Draws `min(round_count, catalog.len())` distinct items uniformly at random.
    ///
    /// The caller guarantees a non-empty catalog.
    pub fn draw<R: Rng + ?Sized>(
        serial: u64,
        catalog: &[Item],
        locale: Locale,
        rules: &GameRules,
        rng: &mut R,
    ) -> Self {
        let amount = rules.round_count().min(catalog.len());
        let rounds = index::sample(rng, catalog.len(), amount)
            .into_iter()
            .map(|i| catalog[i].clone())
            .collect();

        Self {
            serial,
            locale,
            rounds,
            round: 0,
            score: 0,
            clock: RoundClock::from_rules(rules),
            feedback: None,
            records: Vec::with_capacity(amount),
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn rounds(&self) -> &[Item] {
        &self.rounds
    }

    /// Zero-based index of the current round.
    #[must_use]
    pub fn round_index(&self) -> usize {
        self.round
    }

    #[must_use]
    pub fn round_total(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.round + 1 >= self.rounds.len()
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&Item> {
        self.rounds.get(self.round)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    #[must_use]
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    #[must_use]
    pub fn token(&self) -> RoundToken {
        RoundToken {
            session: self.serial,
            round: self.round,
        }
    }

    pub(crate) fn clock_mut(&mut self) -> &mut RoundClock {
        &mut self.clock
    }

    pub(crate) fn set_feedback(&mut self, feedback: Option<Feedback>) {
        self.feedback = feedback;
    }

    /// Appends the record for the current round. Only one per round.
    pub(crate) fn settle(&mut self, record: RoundRecord) {
        debug_assert_eq!(self.records.len(), self.round, "round settled twice");
        self.score = self.score.saturating_add(record.score());
        self.records.push(record);
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.records.len() > self.round
    }

    pub(crate) fn next_round(&mut self) {
        self.round += 1;
        self.clock.reset();
        self.feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::tests::catalog;

    #[test]
    fn large_catalog_draws_ten_distinct_rounds() {
        let catalog = catalog(15);
        let ids: HashSet<_> = catalog.iter().map(|i| i.id().clone()).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let s = Session::draw(1, &catalog, Locale::Jp, &GameRules::default(), &mut rng);
            assert_eq!(s.round_total(), 10);
            let drawn: HashSet<_> = s.rounds().iter().map(|i| i.id().clone()).collect();
            assert_eq!(drawn.len(), 10);
            assert!(drawn.is_subset(&ids));
        }
    }

    #[test]
    fn small_catalog_uses_every_item() {
        let catalog = catalog(3);
        let mut rng = StdRng::seed_from_u64(7);
        let s = Session::draw(1, &catalog, Locale::Kr, &GameRules::default(), &mut rng);
        assert_eq!(s.round_total(), 3);
        assert_eq!(s.score(), 0);
        assert!(s.records().is_empty());
        assert_eq!(s.clock().remaining_ms(), 30_000);
    }
}
