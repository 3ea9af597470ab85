pub mod tasks;
pub mod ticker;
pub mod timer;
