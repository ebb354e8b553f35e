//! Loading indicator.

use dioxus::prelude::*;

/// Full-page loading state, shown while the session is being resolved.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div { class: "loading-spinner",
            div { class: "spinner-ring" }
            p { class: "loading-label", "Loading..." }
        }
    }
}
