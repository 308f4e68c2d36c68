//! CLI command handlers, one per file.

mod completions;
mod info;
mod job;
mod status;

pub use completions::{run_completions, run_man};
pub use info::run_info;
pub use job::run_job_action;
pub use status::run_status;
