//! Appwrite REST binding: connection configuration plus a typed client.

mod client;
mod config;

pub use client::*;
pub use config::*;
