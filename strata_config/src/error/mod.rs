//! Error types produced while resolving and loading configuration.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{StrataError, StrataResult};
