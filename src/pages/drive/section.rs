//! File-section pages.

use dioxus::prelude::*;

use crate::routes::Route;
use crate::state::section_by_slug;

/// Shell of one file section (documents, images, media, others). Unknown
/// slugs fall back to a not-found card.
#[component]
pub fn Section(section: String) -> Element {
    match section_by_slug(&section) {
        Some(item) => rsx! {
            div { class: "page",
                div { class: "section-head",
                    img { src: "{item.icon}", alt: "", class: "section-head-icon" }
                    h1 { class: "page-title", "{item.name}" }
                }
                div { class: "empty-state",
                    p { "Nothing here yet." }
                    p { class: "empty-state-hint",
                        "Files you upload from the menu will show up in their section."
                    }
                }
            }
        },
        None => rsx! {
            div { class: "page not-found",
                h1 { class: "page-title", "Page not found" }
                Link { to: Route::Dashboard {}, class: "not-found-link", "Back to the dashboard" }
            }
        },
    }
}
