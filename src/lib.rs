pub mod ass;
pub mod commands;
pub mod keybinds;
pub mod main_menu;
pub mod menu;
pub mod osd;
pub mod player;
pub mod progress;
pub mod session;
pub mod settings;
mod telemetry;

pub use telemetry::{init_tracing, trace_log_path};
