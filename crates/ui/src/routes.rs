use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::GameView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", GameView)] Game {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Skin Guess" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
