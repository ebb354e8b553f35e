//! Sign-in page.

use dioxus::prelude::*;

use super::AuthShell;
use crate::auth::use_auth;
use crate::components::{AuthForm, AuthMode};
use crate::routes::Route;

/// OTP sign-in for an existing account.
#[component]
pub fn SignIn() -> Element {
    let auth = use_auth();
    let navigator = use_navigator();

    // Already signed in, nothing to do here
    if auth.is_authenticated() {
        navigator.replace(Route::Dashboard {});
        return rsx! {};
    }

    rsx! {
        AuthShell {
            AuthForm { mode: AuthMode::SignIn }
        }
    }
}
