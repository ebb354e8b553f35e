//! Dashboard page.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::state::NAV_ITEMS;

/// Landing page of the signed-in area: greeting plus section shortcuts.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let username = auth
        .current()
        .map(|user| user.username)
        .unwrap_or_default();

    rsx! {
        div { class: "page",
            h1 { class: "page-title", "Welcome back, {username}" }
            p { class: "page-subtitle", "Pick a section to browse your files." }

            div { class: "section-grid",
                for item in NAV_ITEMS.iter().filter(|item| item.url != "/") {
                    Link { to: item.url,
                        div { class: "section-card",
                            img { src: "{item.icon}", alt: "", class: "section-card-icon" }
                            p { "{item.name}" }
                        }
                    }
                }
            }
        }
    }
}
