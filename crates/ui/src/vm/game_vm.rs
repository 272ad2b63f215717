use guess_core::game::{Feedback, GamePhase, GameSnapshot};
use guess_core::model::{Locale, RoundRecord};

use super::time_fmt::{format_elapsed, format_secs};

/// Remaining time at or under which the timer is drawn as urgent.
pub const URGENT_MS: u32 = 5_000;

#[must_use]
pub fn locale_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Jp => "日本語",
        Locale::Kr => "한국어",
    }
}

//
// ─── START ─────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartVm {
    pub catalog_label: String,
    pub rounds: usize,
    /// Set when the catalog is smaller than a full session.
    pub short_catalog_note: Option<String>,
}

#[must_use]
pub fn map_start(snapshot: &GameSnapshot, round_count: usize) -> StartVm {
    let size = snapshot.catalog_size;
    let rounds = size.min(round_count);
    let short_catalog_note = (size < round_count).then(|| {
        format!("Only {size} skins in the catalog, so this session has {rounds} rounds.")
    });
    StartVm {
        catalog_label: format!("{size} skins in the catalog"),
        rounds,
        short_catalog_note,
    }
}

//
// ─── PLAYING ───────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashVm {
    Idle,
    Correct,
    Wrong,
}

impl FlashVm {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            FlashVm::Idle => "mosaic-frame",
            FlashVm::Correct => "mosaic-frame mosaic-frame--correct",
            FlashVm::Wrong => "mosaic-frame mosaic-frame--wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudVm {
    pub round_label: String,
    pub score_label: String,
    pub timer_label: String,
    pub urgent: bool,
    pub flash: FlashVm,
    /// Guessing is paused while a correct answer is acknowledged.
    pub input_locked: bool,
}

#[must_use]
pub fn map_hud(snapshot: &GameSnapshot) -> HudVm {
    let flash = match snapshot.feedback {
        None => FlashVm::Idle,
        Some(Feedback::Correct) => FlashVm::Correct,
        Some(Feedback::Wrong { .. }) => FlashVm::Wrong,
    };
    HudVm {
        round_label: format!(
            "Round {} / {}",
            snapshot.round_number(),
            snapshot.round_total
        ),
        score_label: format!("Score {}", snapshot.score),
        timer_label: format_secs(snapshot.remaining_secs()),
        urgent: snapshot.remaining_ms <= URGENT_MS,
        flash,
        input_locked: snapshot.is_frozen(),
    }
}

//
// ─── ROUND RESULT ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResultVm {
    pub is_win: bool,
    pub outcome_label: &'static str,
    pub answer: String,
    pub other_name: String,
    pub elapsed_label: String,
    pub points_label: String,
    pub advance_label: &'static str,
}

/// Answer card for the round that just ended.
#[must_use]
pub fn map_round_result(snapshot: &GameSnapshot) -> Option<RoundResultVm> {
    if snapshot.phase != GamePhase::RoundResult {
        return None;
    }
    let record = snapshot.last_record.as_ref()?;
    let locale = snapshot.locale.unwrap_or_default();
    let advance_label = if snapshot.round_number() >= snapshot.round_total {
        "See results"
    } else {
        "Next round"
    };
    Some(RoundResultVm {
        is_win: record.is_win(),
        outcome_label: record.outcome().label(),
        answer: record.item().name(locale).to_string(),
        other_name: record.item().other_name(locale).to_string(),
        elapsed_label: format_elapsed(record.elapsed_secs()),
        points_label: format!("+{}", record.score()),
        advance_label,
    })
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub number: usize,
    pub name: String,
    pub outcome_label: &'static str,
    pub elapsed_label: String,
    pub points_label: String,
    pub is_fastest: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_label: String,
    pub wins_label: String,
    pub fastest_label: Option<String>,
    pub rows: Vec<ResultRowVm>,
}

#[must_use]
pub fn map_result(snapshot: &GameSnapshot) -> Option<ResultVm> {
    let summary = snapshot.summary.as_ref()?;
    let locale = snapshot.locale.unwrap_or_default();
    let fastest_index = summary.fastest_index();
    let rows = summary
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| map_row(i, record, locale, fastest_index == Some(i)))
        .collect();
    let fastest_label = summary.fastest().map(|record| {
        format!(
            "Fastest: {} in {}",
            record.item().name(locale),
            format_elapsed(record.elapsed_secs())
        )
    });
    Some(ResultVm {
        score_label: format!("{} points", summary.total_score()),
        wins_label: format!("{} / {} correct", summary.wins(), summary.records().len()),
        fastest_label,
        rows,
    })
}

fn map_row(index: usize, record: &RoundRecord, locale: Locale, is_fastest: bool) -> ResultRowVm {
    ResultRowVm {
        number: index + 1,
        name: record.item().name(locale).to_string(),
        outcome_label: record.outcome().label(),
        elapsed_label: format_elapsed(record.elapsed_secs()),
        points_label: record.score().to_string(),
        is_fastest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guess_core::game::SessionSummary;
    use guess_core::model::{Item, ItemDraft};
    use guess_core::time::fixed_now;

    fn item(id: &str, jp: &str, kr: &str) -> Item {
        ItemDraft::new(id, jp, kr, "a.png")
            .validate(fixed_now())
            .unwrap()
    }

    fn playing(remaining_ms: u32, feedback: Option<Feedback>) -> GameSnapshot {
        GameSnapshot {
            phase: GamePhase::Playing,
            locale: Some(Locale::Kr),
            round_index: 2,
            round_total: 10,
            score: 57,
            round_budget_ms: 30_000,
            remaining_ms,
            elapsed_ms: 30_000 - remaining_ms,
            feedback,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn start_notes_short_catalog() {
        let snap = GameSnapshot {
            catalog_size: 3,
            ..GameSnapshot::default()
        };
        let vm = map_start(&snap, 10);
        assert_eq!(vm.rounds, 3);
        assert!(vm.short_catalog_note.unwrap().contains("3 rounds"));

        let full = GameSnapshot {
            catalog_size: 15,
            ..GameSnapshot::default()
        };
        let vm = map_start(&full, 10);
        assert_eq!(vm.rounds, 10);
        assert_eq!(vm.short_catalog_note, None);
    }

    #[test]
    fn hud_shows_round_score_and_timer() {
        let vm = map_hud(&playing(12_370, None));
        assert_eq!(vm.round_label, "Round 3 / 10");
        assert_eq!(vm.score_label, "Score 57");
        assert_eq!(vm.timer_label, "12.4s");
        assert!(!vm.urgent);
        assert_eq!(vm.flash, FlashVm::Idle);
        assert!(!vm.input_locked);
    }

    #[test]
    fn hud_flags_urgency_and_feedback() {
        let vm = map_hud(&playing(4_000, Some(Feedback::Wrong { flash: 2 })));
        assert!(vm.urgent);
        assert_eq!(vm.flash, FlashVm::Wrong);
        assert_eq!(vm.flash.class(), "mosaic-frame mosaic-frame--wrong");

        assert!(!vm.input_locked);

        let vm = map_hud(&playing(9_000, Some(Feedback::Correct)));
        assert_eq!(vm.flash, FlashVm::Correct);
        assert!(vm.input_locked);
    }

    #[test]
    fn round_result_names_answer_in_target_language() {
        let record = RoundRecord::win(item("s1", "アヤ", "아야"), 2_300, 28);
        let snap = GameSnapshot {
            phase: GamePhase::RoundResult,
            locale: Some(Locale::Kr),
            round_index: 9,
            round_total: 10,
            last_record: Some(record),
            ..GameSnapshot::default()
        };
        let vm = map_round_result(&snap).unwrap();
        assert!(vm.is_win);
        assert_eq!(vm.outcome_label, "WIN");
        assert_eq!(vm.answer, "아야");
        assert_eq!(vm.other_name, "アヤ");
        assert_eq!(vm.elapsed_label, "2.30s");
        assert_eq!(vm.points_label, "+28");
        assert_eq!(vm.advance_label, "See results");
    }

    #[test]
    fn round_result_only_in_round_result_phase() {
        let snap = GameSnapshot {
            last_record: Some(RoundRecord::lose(item("s1", "a", "b"), 30_000)),
            ..playing(0, None)
        };
        assert_eq!(map_round_result(&snap), None);
    }

    #[test]
    fn result_highlights_first_fastest_win() {
        let records = vec![
            RoundRecord::win(item("a", "エー", "에이"), 5_000, 25),
            RoundRecord::lose(item("b", "ビー", "비"), 30_000),
            RoundRecord::win(item("c", "シー", "씨"), 2_300, 28),
            RoundRecord::win(item("d", "ディー", "디"), 2_300, 28),
        ];
        let snap = GameSnapshot {
            phase: GamePhase::Result,
            locale: Some(Locale::Jp),
            summary: Some(SessionSummary::from_records(&records)),
            ..GameSnapshot::default()
        };
        let vm = map_result(&snap).unwrap();
        assert_eq!(vm.score_label, "81 points");
        assert_eq!(vm.wins_label, "3 / 4 correct");
        assert_eq!(vm.fastest_label.as_deref(), Some("Fastest: シー in 2.30s"));
        let fastest: Vec<usize> = vm
            .rows
            .iter()
            .filter(|r| r.is_fastest)
            .map(|r| r.number)
            .collect();
        assert_eq!(fastest, vec![3]);
        assert_eq!(vm.rows[1].outcome_label, "LOSE");
        assert_eq!(vm.rows[1].points_label, "0");
    }

    #[test]
    fn result_without_wins_has_no_fastest() {
        let records = vec![RoundRecord::lose(item("a", "エー", "에이"), 30_000)];
        let snap = GameSnapshot {
            phase: GamePhase::Result,
            summary: Some(SessionSummary::from_records(&records)),
            ..GameSnapshot::default()
        };
        let vm = map_result(&snap).unwrap();
        assert_eq!(vm.fastest_label, None);
        assert_eq!(vm.score_label, "0 points");
    }
}
