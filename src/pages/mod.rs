//! Page components, one module per area of the app.

pub mod auth;
pub mod drive;

mod not_found;

pub use not_found::*;
