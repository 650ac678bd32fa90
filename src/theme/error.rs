//! Theme errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse theme `{}`", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_yaml::Error,
    },

    #[error("invalid theme `{}`: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("preference store error: {0}")]
    Preference(String),
}
