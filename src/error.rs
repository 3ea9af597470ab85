//! Error types shared by the task list, config loader and app setup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PomodoError {
    /// An index-based task operation pointed past the end of the list
    #[error("task index {index} out of range (list has {len} tasks)")]
    TaskIndexOutOfRange { index: usize, len: usize },

    /// Task text was empty after trimming
    #[error("task text is empty")]
    EmptyTaskText,

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PomodoError>;
