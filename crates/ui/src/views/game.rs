mod prediction;
mod screens;

use std::sync::Arc;

use dioxus::prelude::*;
use guess_core::game::GamePhase;
use guess_core::model::{ImageRef, ItemId, Locale};
use image::DynamicImage;
use services::GameHandle;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{MosaicVm, map_hud, map_result, map_round_result, map_start, mosaic_data_uri};

pub use prediction::PredictionInput;
pub use screens::{PlayingScreen, ResultScreen, RoundResultScreen, StartScreen};

#[derive(Clone, Debug, PartialEq)]
enum GameAction {
    SelectLanguage(Locale),
    Guess(ItemId),
    Advance,
    Restart,
}

type LoadedImage = Option<(ImageRef, Arc<DynamicImage>)>;

#[component]
pub fn GameView() -> Element {
    let ctx = use_context::<AppContext>();
    let game_loop = ctx.game_loop();
    let round_count = game_loop.rules().round_count();

    let resource = use_resource(move || {
        let game_loop = game_loop.clone();
        async move {
            game_loop
                .start()
                .await
                .map_err(|err| ViewError::from(&err))
        }
    });

    let state = view_state_from_resource(resource);
    rsx! {
        div { class: "page game-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "loading", "Loading catalog..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(handle) => rsx! {
                    GameScreen { handle, round_count }
                },
            }
        }
    }
}

/// Follows one running game and renders the screen for its phase.
#[component]
fn GameScreen(handle: GameHandle, round_count: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let images = ctx.images();
    let mut snapshot = use_signal(|| handle.snapshot());
    let mut error = use_signal(|| None::<ViewError>);

    let watcher = handle.clone();
    use_future(move || {
        let mut watcher = watcher.clone();
        async move {
            while let Ok(next) = watcher.changed().await {
                snapshot.set(next);
            }
        }
    });

    let image_ref = use_memo(move || {
        snapshot
            .read()
            .current_item
            .as_ref()
            .map(|item| item.image().clone())
    });
    let bitmap = use_resource(move || {
        let images = images.clone();
        let image = image_ref();
        async move {
            let Some(image) = image else {
                return Ok::<LoadedImage, ViewError>(None);
            };
            let bitmap = images
                .load(&image)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok(Some((image, bitmap)))
        }
    });

    let progress = use_memo(move || snapshot.read().reveal_progress());
    let mosaic = use_memo(move || {
        let progress = progress();
        let current = image_ref();
        let loaded = bitmap.value();
        let loaded = loaded.read();
        match (loaded.as_ref(), current) {
            (Some(Err(_)), _) => MosaicVm::Unavailable,
            // A previous round's bitmap may still be in the resource while the next one loads.
            (Some(Ok(Some((image, source)))), Some(current)) if *image == current => {
                mosaic_data_uri(source, progress).map_or(MosaicVm::Unavailable, MosaicVm::Ready)
            }
            _ => MosaicVm::Loading,
        }
    });

    let send = {
        let handle = handle.clone();
        use_callback(move |action: GameAction| {
            let sent = match action {
                GameAction::SelectLanguage(locale) => handle.select_language(locale),
                GameAction::Guess(id) => handle.submit_guess(id),
                GameAction::Advance => handle.advance(),
                GameAction::Restart => handle.restart(),
            };
            if sent.is_err() {
                error.set(Some(ViewError::Unknown));
            }
        })
    };

    let snap = snapshot.read().clone();
    let catalog = handle.catalog();
    let banner = error().map(|err| {
        rsx! {
            p { class: "error", "{err.message()}" }
        }
    });
    let screen = match snap.phase {
        GamePhase::Start => rsx! {
            StartScreen {
                vm: map_start(&snap, round_count),
                on_select: move |locale| send.call(GameAction::SelectLanguage(locale)),
            }
        },
        GamePhase::Playing => rsx! {
            PlayingScreen {
                hud: map_hud(&snap),
                mosaic: mosaic(),
                catalog,
                locale: snap.locale.unwrap_or_default(),
                on_guess: move |id| send.call(GameAction::Guess(id)),
            }
        },
        GamePhase::RoundResult => match map_round_result(&snap) {
            Some(vm) => rsx! {
                RoundResultScreen {
                    vm,
                    mosaic: mosaic(),
                    on_advance: move |()| send.call(GameAction::Advance),
                }
            },
            None => rsx! {},
        },
        GamePhase::Result => match map_result(&snap) {
            Some(vm) => rsx! {
                ResultScreen {
                    vm,
                    on_restart: move |()| send.call(GameAction::Restart),
                }
            },
            None => rsx! {},
        },
    };

    rsx! {
        {banner}
        {screen}
    }
}
