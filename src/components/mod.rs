//! Reusable UI components

mod app_layout;
mod auth_form;
mod file_uploader;
mod loading;
mod mobile_navigation;
mod otp_modal;

pub use app_layout::*;
pub use auth_form::*;
pub use file_uploader::*;
pub use loading::*;
pub use mobile_navigation::*;
pub use otp_modal::*;
