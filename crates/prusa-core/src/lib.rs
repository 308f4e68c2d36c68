pub mod config;
pub mod logging;

pub mod client;
pub mod format;
pub mod retry;
