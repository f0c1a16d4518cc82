//! CLI command implementations

mod context;
mod release;

pub use context::EVENT_PATH_VAR;
pub use release::run_release;
