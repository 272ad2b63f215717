use std::sync::Arc;

use dioxus::prelude::*;
use guess_core::model::{Item, ItemId, Locale};

use crate::vm::{HudVm, MOSAIC_BOX, MosaicVm, ResultVm, RoundResultVm, StartVm, locale_label};

use super::prediction::PredictionInput;

#[component]
pub fn StartScreen(vm: StartVm, on_select: EventHandler<Locale>) -> Element {
    let buttons = Locale::ALL.iter().map(|&locale| {
        rsx! {
            button {
                key: "{locale.code()}",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_select.call(locale),
                "{locale_label(locale)}"
            }
        }
    });
    let note = vm.short_catalog_note.as_ref().map(|note| {
        rsx! {
            p { class: "note", "{note}" }
        }
    });
    rsx! {
        section { class: "screen screen--start",
            h2 { class: "view-title", "Guess the skin" }
            p { class: "view-subtitle", "{vm.catalog_label}" }
            {note}
            p { "Choose the answer language" }
            div { class: "language-buttons", {buttons} }
        }
    }
}

#[component]
pub fn PlayingScreen(
    hud: HudVm,
    mosaic: MosaicVm,
    catalog: Arc<[Item]>,
    locale: Locale,
    on_guess: EventHandler<ItemId>,
) -> Element {
    let timer_class = if hud.urgent {
        "hud-timer hud-timer--urgent"
    } else {
        "hud-timer"
    };
    rsx! {
        section { class: "screen screen--playing",
            div { class: "hud",
                span { class: "hud-round", "{hud.round_label}" }
                span { class: timer_class, "{hud.timer_label}" }
                span { class: "hud-score", "{hud.score_label}" }
            }
            MosaicFrame { class: hud.flash.class(), src: mosaic }
            PredictionInput {
                catalog,
                locale,
                disabled: hud.input_locked,
                on_confirm: on_guess,
            }
        }
    }
}

#[component]
pub fn RoundResultScreen(
    vm: RoundResultVm,
    mosaic: MosaicVm,
    on_advance: EventHandler<()>,
) -> Element {
    let outcome_class = if vm.is_win {
        "outcome outcome--win"
    } else {
        "outcome outcome--lose"
    };
    rsx! {
        section { class: "screen screen--round-result",
            MosaicFrame { class: "mosaic-frame", src: mosaic }
            p { class: outcome_class, "{vm.outcome_label}" }
            h2 { class: "answer", "{vm.answer}" }
            p { class: "answer-other", "{vm.other_name}" }
            p { class: "round-stats",
                span { "{vm.elapsed_label}" }
                span { " · " }
                span { "{vm.points_label}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                autofocus: true,
                onclick: move |_| on_advance.call(()),
                "{vm.advance_label}"
            }
        }
    }
}

#[component]
pub fn ResultScreen(vm: ResultVm, on_restart: EventHandler<()>) -> Element {
    let rows = vm.rows.iter().map(|row| {
        let class = if row.is_fastest {
            "result-row result-row--fastest"
        } else {
            "result-row"
        };
        rsx! {
            tr { key: "{row.number}", class: "{class}",
                td { "{row.number}" }
                td { "{row.name}" }
                td { "{row.outcome_label}" }
                td { "{row.elapsed_label}" }
                td { "{row.points_label}" }
            }
        }
    });
    let fastest = vm.fastest_label.as_ref().map(|fastest| {
        rsx! {
            p { class: "fastest", "{fastest}" }
        }
    });
    rsx! {
        section { class: "screen screen--result",
            h2 { class: "view-title", "{vm.score_label}" }
            p { class: "view-subtitle", "{vm.wins_label}" }
            {fastest}
            table { class: "result-table",
                thead {
                    tr {
                        th { "#" }
                        th { "Skin" }
                        th { "Result" }
                        th { "Time" }
                        th { "Points" }
                    }
                }
                tbody { {rows} }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                autofocus: true,
                onclick: move |_| on_restart.call(()),
                "Play again"
            }
        }
    }
}

#[component]
fn MosaicFrame(class: &'static str, src: MosaicVm) -> Element {
    let width = MOSAIC_BOX.width;
    let height = MOSAIC_BOX.height;
    let placeholder = src.placeholder();
    rsx! {
        div { class: "{class}",
            match (src, placeholder) {
                (MosaicVm::Ready(src), _) => rsx! {
                    img { src: "{src}", width: "{width}", height: "{height}", alt: "Hidden skin" }
                },
                (_, label) => rsx! {
                    div {
                        class: "mosaic-placeholder",
                        style: "width: {width}px; height: {height}px;",
                        "{label.unwrap_or_default()}"
                    }
                },
            }
        }
    }
}
