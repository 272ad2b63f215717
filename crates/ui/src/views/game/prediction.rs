use std::sync::Arc;

use dioxus::prelude::*;
use guess_core::model::{Item, ItemId, Locale};
use services::PredictionSearch;

use crate::vm::map_candidates;

/// Free-text guess box with a keyboard-driven candidate list.
///
/// Arrow keys and Tab move the selection, Enter or a click confirms it.
/// Nothing is confirmed while `disabled` is set.
#[component]
pub fn PredictionInput(
    catalog: Arc<[Item]>,
    locale: Locale,
    disabled: bool,
    on_confirm: EventHandler<ItemId>,
) -> Element {
    let mut search = use_signal(|| PredictionSearch::new(Arc::clone(&catalog), locale));

    let rows = map_candidates(&search.read());
    let query = search.read().query().to_string();
    let candidates = rows.into_iter().map(|row| {
        let mut search = search;
        let index = row.index;
        let class = if row.selected {
            "candidate candidate--selected"
        } else {
            "candidate"
        };
        rsx! {
            li {
                key: "{index}",
                class: "{class}",
                onmousedown: move |evt: MouseEvent| {
                    // Keep focus in the input.
                    evt.prevent_default();
                    if disabled {
                        return;
                    }
                    search.write().select(index);
                    confirm_selection(search, on_confirm);
                },
                span { class: "candidate-label", "{row.label}" }
                span { class: "candidate-sub", "{row.sub_label}" }
            }
        }
    });

    rsx! {
        div { class: "prediction",
            input {
                class: "prediction-input",
                r#type: "text",
                autofocus: true,
                autocomplete: "off",
                disabled: disabled,
                placeholder: "Type a skin name",
                value: "{query}",
                oninput: move |evt: FormEvent| search.write().set_query(evt.value()),
                onkeydown: move |evt: KeyboardEvent| match evt.data.key() {
                    Key::ArrowDown => {
                        evt.prevent_default();
                        search.write().select_next();
                    }
                    Key::ArrowUp => {
                        evt.prevent_default();
                        search.write().select_previous();
                    }
                    Key::Tab => {
                        evt.prevent_default();
                        if evt.data.modifiers().contains(Modifiers::SHIFT) {
                            search.write().select_previous();
                        } else {
                            search.write().select_next();
                        }
                    }
                    Key::Enter => {
                        evt.prevent_default();
                        if !disabled {
                            confirm_selection(search, on_confirm);
                        }
                    }
                    Key::Escape => {
                        evt.prevent_default();
                        search.write().clear();
                    }
                    _ => {}
                },
            }
            ul { class: "candidates", {candidates} }
        }
    }
}

fn confirm_selection(mut search: Signal<PredictionSearch>, on_confirm: EventHandler<ItemId>) {
    let confirmed = search.write().confirm();
    if let Some(id) = confirmed {
        on_confirm.call(id);
    }
}
