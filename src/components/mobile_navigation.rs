//! Mobile header with the slide-out navigation drawer.

use dioxus::prelude::*;

use super::FileUploader;
use crate::auth::{sign_out, use_auth};
use crate::routes::Route;
use crate::state::{DrawerState, NAV_ITEMS};

#[derive(Props, Clone, PartialEq)]
pub struct MobileNavigationProps {
    /// User document id, scoping uploads to their owner.
    pub owner_id: String,
    /// Appwrite account id.
    pub account_id: String,
    pub username: String,
    /// Avatar image URL.
    pub avatar: String,
    pub email: String,
}

/// Mobile chrome: brand header plus a drawer with the user's identity,
/// the section navigation, the upload control and sign-out.
///
/// Signing out clears the shared auth state and nothing else; the layout
/// guard owns the redirect that follows.
#[component]
pub fn MobileNavigation(props: MobileNavigationProps) -> Element {
    let auth = use_auth();
    let mut drawer = use_signal(DrawerState::default);
    let current_path = use_route::<Route>().to_string();

    let handle_sign_out = move |_| {
        spawn(async move {
            if sign_out().await.is_ok() {
                auth.clear();
            }
        });
    };

    let open = drawer.read().is_open();

    rsx! {
        header { class: "mobile-header",
            img {
                src: "/assets/icons/logo-full.svg",
                alt: "Skystash",
                class: "mobile-header-logo",
            }

            button {
                class: "icon-button",
                aria_label: "Open navigation",
                onclick: move |_| drawer.write().open(),
                img { src: "/assets/icons/menu.svg", alt: "", class: "icon-image" }
            }

            if open {
                div {
                    class: "drawer-overlay",
                    onclick: move |_| drawer.write().close(),
                }
                aside { class: "drawer-panel",
                    div { class: "drawer-head",
                        div { class: "header-user",
                            img {
                                src: "{props.avatar}",
                                alt: "avatar",
                                class: "header-user-avatar",
                            }
                            div { class: "header-user-identity",
                                p { class: "header-user-name", "{props.username}" }
                                p { class: "header-user-email", "{props.email}" }
                            }
                        }
                        button {
                            class: "icon-button",
                            aria_label: "Close navigation",
                            onclick: move |_| drawer.write().close(),
                            svg {
                                class: "icon-image",
                                fill: "none",
                                stroke: "currentColor",
                                view_box: "0 0 24 24",
                                path {
                                    stroke_linecap: "round",
                                    stroke_linejoin: "round",
                                    stroke_width: "2",
                                    d: "M6 18L18 6M6 6l12 12",
                                }
                            }
                        }
                    }

                    hr { class: "drawer-separator" }

                    nav { class: "mobile-nav",
                        ul { class: "mobile-nav-list",
                            for item in NAV_ITEMS {
                                Link { to: item.url,
                                    li {
                                        class: if item.is_active(&current_path) {
                                            "mobile-nav-item active"
                                        } else {
                                            "mobile-nav-item"
                                        },
                                        img { src: "{item.icon}", alt: "", class: "nav-icon" }
                                        p { "{item.name}" }
                                    }
                                }
                            }
                        }
                    }

                    hr { class: "drawer-separator" }

                    div { class: "drawer-footer",
                        FileUploader {
                            owner_id: props.owner_id.clone(),
                            account_id: props.account_id.clone(),
                        }
                        button {
                            class: "sign-out-button",
                            onclick: handle_sign_out,
                            img { src: "/assets/icons/logout.svg", alt: "", class: "icon-image" }
                            p { "Sign Out" }
                        }
                    }
                }
            }
        }
    }
}
