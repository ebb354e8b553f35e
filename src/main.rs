//! Skystash - Dioxus Fullstack Web Application
//!
//! Web frontend of the Skystash cloud file storage service: sign-in and
//! sign-up with email OTP verification, plus the signed-in navigation
//! chrome, all backed by an Appwrite project.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --features web,server
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web,server
//! ```

#![allow(non_snake_case)]

mod app;
mod appwrite;
mod auth;
mod components;
mod pages;
mod routes;
mod state;
mod types;

#[cfg(not(feature = "server"))]
fn main() {
    // The default fmt timer needs a system clock, which wasm lacks
    tracing_subscriber::fmt().without_time().init();

    dioxus::launch(app::App);
}

/// Server entry: installs the session layer the auth server functions
/// extract from, then serves the Dioxus application through axum.
#[cfg(feature = "server")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use dioxus::prelude::*;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    tracing_subscriber::fmt::init();

    if let Err(err) = appwrite::init_config() {
        tracing::error!("configuration error: {err:#}");
        std::process::exit(1);
    }

    // Cookie secure flag stays off: dev serves over plain http
    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    let address = dioxus::cli_config::fullstack_address_or_localhost();
    let router = Router::new()
        .serve_dioxus_application(ServeConfigBuilder::default(), app::App)
        .layer(session_layer);

    let listener = match tokio::net::TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {address}: {err}");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on {address}");

    if let Err(err) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("server error: {err}");
        std::process::exit(1);
    }
}
