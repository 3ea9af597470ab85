pub mod input_handler;
pub mod popups;
pub mod render;
pub mod task_formatter;
pub mod terminal;
pub mod theme;

// Re-export functions for external use:
pub use input_handler::{Runtime, run_app};
pub use terminal::TerminalGuard;
