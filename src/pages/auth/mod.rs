//! Authentication pages.

mod sign_in;
mod sign_up;

pub use sign_in::*;
pub use sign_up::*;

use dioxus::prelude::*;

/// Split-screen shell shared by the auth pages: brand panel on wide
/// screens, the form beside it.
#[component]
fn AuthShell(children: Element) -> Element {
    rsx! {
        div { class: "auth-page",
            section { class: "auth-brand",
                img {
                    src: "/assets/icons/logo-full-light.svg",
                    alt: "Skystash",
                    class: "auth-brand-logo",
                }
                div { class: "auth-brand-copy",
                    h2 { "Manage your files the best way" }
                    p { "A place where you can store all your documents." }
                }
                img {
                    src: "/assets/icons/illustration.svg",
                    alt: "",
                    class: "auth-brand-illustration",
                }
            }
            section { class: "auth-content",
                {children}
            }
        }
    }
}
