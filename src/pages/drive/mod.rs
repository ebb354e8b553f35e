//! Signed-in pages.

mod dashboard;
mod section;

pub use dashboard::*;
pub use section::*;
