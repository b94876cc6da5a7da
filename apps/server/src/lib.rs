pub mod api;
pub mod config;
pub mod error;
mod main_lib;
mod scheduler;

pub use main_lib::{build_state, init_tracing, AppState};
pub use scheduler::start_refresh_scheduler;
