//! Catch-all for unknown routes.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn PageNotFound(route: Vec<String>) -> Element {
    let path = route.join("/");

    rsx! {
        div { class: "page not-found",
            h1 { class: "page-title", "Page not found" }
            p { class: "page-subtitle", "There is nothing at /{path}" }
            Link { to: Route::SignIn {}, class: "not-found-link", "Go to sign-in" }
        }
    }
}
