//! Authentication: shared context plus the server-side operations.

mod context;
mod server_fns;

pub use context::*;
pub use server_fns::*;
