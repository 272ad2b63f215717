use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use guess_core::model::{Item, ItemDraft, Locale};
use guess_core::time::fixed_now;
use services::{GameLoopService, ImageLoader};
use storage::repository::{InMemoryRepository, ItemRepository};

use crate::context::{UiApp, build_app_context};
use crate::views::{GameView, PlayingScreen, ResultScreen, RoundResultScreen};
use crate::vm::{HudVm, MosaicVm, ResultVm, RoundResultVm};

#[derive(Clone)]
struct TestApp {
    game_loop: Arc<GameLoopService>,
    images: Arc<ImageLoader>,
}

impl UiApp for TestApp {
    fn game_loop(&self) -> Arc<GameLoopService> {
        Arc::clone(&self.game_loop)
    }

    fn images(&self) -> Arc<ImageLoader> {
        Arc::clone(&self.images)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { GameView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn catalog(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            ItemDraft::new(format!("s{i}"), format!("スキン{i}"), format!("스킨{i}"), "skin.png")
                .validate(fixed_now())
                .expect("valid item")
        })
        .collect()
}

pub fn setup_view_harness(items: Vec<Item>) -> ViewHarness {
    setup_view_harness_with_repo(Arc::new(InMemoryRepository::with_items(items)))
}

pub fn setup_view_harness_with_repo(repo: Arc<dyn ItemRepository>) -> ViewHarness {
    let app = Arc::new(TestApp {
        game_loop: Arc::new(GameLoopService::new(repo).with_seed(7)),
        images: Arc::new(ImageLoader::new()),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app });
    ViewHarness { dom }
}

#[derive(Clone, PartialEq)]
pub enum ScreenCase {
    Playing(HudVm, MosaicVm),
    RoundResult(RoundResultVm),
    Result(ResultVm),
}

#[component]
fn ScreenHarness(case: ScreenCase) -> Element {
    match case {
        ScreenCase::Playing(hud, mosaic) => {
            let items: Arc<[Item]> = catalog(2).into();
            rsx! {
                PlayingScreen {
                    hud,
                    mosaic,
                    catalog: items,
                    locale: Locale::Jp,
                    on_guess: |_| {},
                }
            }
        }
        ScreenCase::RoundResult(vm) => rsx! {
            RoundResultScreen { vm, mosaic: MosaicVm::Loading, on_advance: |()| {} }
        },
        ScreenCase::Result(vm) => rsx! {
            ResultScreen { vm, on_restart: |()| {} }
        },
    }
}

pub fn render_screen(case: ScreenCase) -> String {
    let mut dom = VirtualDom::new_with_props(ScreenHarness, ScreenHarnessProps { case });
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}
