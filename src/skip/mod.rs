pub mod engine;
pub mod gate;
pub mod handler;
pub mod types;

pub use engine::compute_skip_actions;
pub use handler::{HANDLER_NAME, SkipHandler};
pub use types::{SKIPPED_DESCRIPTION, SkipAction};
