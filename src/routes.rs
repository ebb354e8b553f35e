//! Route definitions for the application.

use dioxus::prelude::*;

use crate::components::AppLayout;
use crate::pages::auth::{SignIn, SignUp};
use crate::pages::drive::{Dashboard, Section};
use crate::pages::PageNotFound;

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    // Auth pages
    #[route("/sign-in")]
    SignIn {},

    #[route("/sign-up")]
    SignUp {},

    // Signed-in area, guarded by the layout
    #[layout(AppLayout)]
        #[route("/")]
        Dashboard {},

        #[route("/:section")]
        Section { section: String },
    #[end_layout]

    #[route("/:..route")]
    PageNotFound { route: Vec<String> },
}
