//! Sign-up page.

use dioxus::prelude::*;

use super::AuthShell;
use crate::auth::use_auth;
use crate::components::{AuthForm, AuthMode};
use crate::routes::Route;

/// Account creation, ending in the same OTP verification as sign-in.
#[component]
pub fn SignUp() -> Element {
    let auth = use_auth();
    let navigator = use_navigator();

    if auth.is_authenticated() {
        navigator.replace(Route::Dashboard {});
        return rsx! {};
    }

    rsx! {
        AuthShell {
            AuthForm { mode: AuthMode::SignUp }
        }
    }
}
