pub mod models;
pub mod ui;

// Re-export commonly used items for convenience
pub use models::App;
