use std::sync::Arc;

use async_trait::async_trait;
use guess_core::game::{Feedback, GamePhase, GameSnapshot, SessionSummary};
use guess_core::model::{Item, ItemId, Locale, RoundRecord};
use storage::repository::{ItemRepository, StorageError};

use super::test_harness::{
    ScreenCase, catalog, render_screen, setup_view_harness, setup_view_harness_with_repo,
};
use crate::vm::{MosaicVm, map_hud, map_result, map_round_result};

struct OfflineRepository;

#[async_trait]
impl ItemRepository for OfflineRepository {
    async fn list_items(&self) -> Result<Vec<Item>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn get_item(&self, _id: &ItemId) -> Result<Item, StorageError> {
        Err(StorageError::NotFound)
    }

    async fn upsert_item(&self, _item: &Item) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn delete_item(&self, _id: &ItemId) -> Result<(), StorageError> {
        Err(StorageError::NotFound)
    }
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_language_choice() {
    let mut harness = setup_view_harness(catalog(3));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Choose the answer language"), "missing prompt in {html}");
    assert!(html.contains("3 skins in the catalog"), "missing size in {html}");
    assert!(html.contains("this session has 3 rounds"), "missing note in {html}");
    assert!(html.contains("日本語") && html.contains("한국어"), "missing buttons in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_reports_empty_catalog() {
    let mut harness = setup_view_harness(Vec::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("The catalog has no skins yet"), "missing message in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_reports_catalog_failure() {
    let mut harness = setup_view_harness_with_repo(Arc::new(OfflineRepository));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Could not load the skin catalog"), "missing message in {html}");
    assert!(!html.contains("no skins yet"), "wrong message in {html}");
}

#[test]
fn playing_screen_renders_hud_and_input() {
    let snap = GameSnapshot {
        phase: GamePhase::Playing,
        locale: Some(Locale::Jp),
        round_index: 0,
        round_total: 10,
        score: 0,
        round_budget_ms: 30_000,
        remaining_ms: 3_000,
        elapsed_ms: 27_000,
        ..GameSnapshot::default()
    };
    let html = render_screen(ScreenCase::Playing(
        map_hud(&snap),
        MosaicVm::Ready("data:image/png;base64,AQID".into()),
    ));
    assert!(html.contains("Round 1 / 10"), "missing round in {html}");
    assert!(html.contains("3.0s"), "missing timer in {html}");
    assert!(html.contains("hud-timer--urgent"), "missing urgency in {html}");
    assert!(html.contains("data:image/png;base64,AQID"), "missing mosaic in {html}");
    assert!(html.contains("Type a skin name"), "missing input in {html}");
    assert!(!html.contains("disabled"), "input locked in {html}");
}

#[test]
fn playing_screen_locks_input_after_correct_guess() {
    let snap = GameSnapshot {
        phase: GamePhase::Playing,
        locale: Some(Locale::Jp),
        round_total: 10,
        round_budget_ms: 30_000,
        remaining_ms: 21_000,
        elapsed_ms: 9_000,
        feedback: Some(Feedback::Correct),
        ..GameSnapshot::default()
    };
    let html = render_screen(ScreenCase::Playing(map_hud(&snap), MosaicVm::Loading));
    assert!(html.contains("mosaic-frame--correct"), "missing flash in {html}");
    assert!(html.contains("disabled"), "input not locked in {html}");
}

#[test]
fn round_result_screen_shows_answer() {
    let item = catalog(1).remove(0);
    let snap = GameSnapshot {
        phase: GamePhase::RoundResult,
        locale: Some(Locale::Kr),
        round_index: 0,
        round_total: 3,
        last_record: Some(RoundRecord::lose(item, 30_000)),
        ..GameSnapshot::default()
    };
    let html = render_screen(ScreenCase::RoundResult(map_round_result(&snap).unwrap()));
    assert!(html.contains("LOSE"), "missing outcome in {html}");
    assert!(html.contains("스킨0"), "missing answer in {html}");
    assert!(html.contains("スキン0"), "missing other name in {html}");
    assert!(html.contains("Next round"), "missing advance in {html}");
    assert!(html.contains("Loading image..."), "missing placeholder in {html}");
}

#[test]
fn result_screen_lists_records_and_fastest() {
    let mut items = catalog(2);
    let second = items.remove(1);
    let first = items.remove(0);
    let records = vec![
        RoundRecord::win(first, 4_200, 26),
        RoundRecord::lose(second, 30_000),
    ];
    let snap = GameSnapshot {
        phase: GamePhase::Result,
        locale: Some(Locale::Jp),
        summary: Some(SessionSummary::from_records(&records)),
        ..GameSnapshot::default()
    };
    let html = render_screen(ScreenCase::Result(map_result(&snap).unwrap()));
    assert!(html.contains("26 points"), "missing score in {html}");
    assert!(html.contains("1 / 2 correct"), "missing wins in {html}");
    assert!(html.contains("Fastest: スキン0 in 4.20s"), "missing fastest in {html}");
    assert!(html.contains("result-row--fastest"), "missing highlight in {html}");
    assert!(html.contains("Play again"), "missing restart in {html}");
}
