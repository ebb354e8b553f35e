//! Layout wrapping the signed-in area.

use dioxus::prelude::*;

use super::{LoadingSpinner, MobileNavigation};
use crate::auth::use_auth;
use crate::routes::Route;

/// Resolves the session before rendering anything: shows the loading
/// state first, sends anonymous visitors to sign-in, and mounts the
/// navigation chrome around the routed page.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let navigator = use_navigator();

    if *auth.loading.read() {
        return rsx! {
            div { class: "page-center",
                LoadingSpinner {}
            }
        };
    }

    let Some(user) = auth.current() else {
        navigator.replace(Route::SignIn {});
        return rsx! {
            div { class: "page-center",
                LoadingSpinner {}
            }
        };
    };

    rsx! {
        div { class: "app-shell",
            MobileNavigation {
                owner_id: user.owner_id,
                account_id: user.account_id,
                username: user.username,
                avatar: user.avatar,
                email: user.email,
            }
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}
