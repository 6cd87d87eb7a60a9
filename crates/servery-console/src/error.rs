use servery_data::DataLoadError;
use std::path::PathBuf;

/// Errors that end or interrupt a console session.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("failed to load menu: {0}")]
    Menu(#[from] DataLoadError),

    #[error("cannot open journal {path}: {source}")]
    Journal {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A numeric prompt got something that is not a number.
    #[error("invalid {field}: '{input}' is not a number")]
    InvalidNumber { field: &'static str, input: String },

    /// Input ended in the middle of a prompt.
    #[error("input ended")]
    UnexpectedEof,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
