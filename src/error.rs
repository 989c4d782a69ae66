use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by adoc-log operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Failed to create note at {}: {source}", path.display())]
    NoteOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write note header to {}: {source}", path.display())]
    NoteWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid date pattern '{0}'")]
    Pattern(String),
    #[error("Editor error: {0}")]
    Editor(String),
    #[error("Finder error: {0}")]
    Finder(String),
    #[error("No binding for key trigger '{0}'")]
    UnknownTrigger(String),
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Could not find home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, Error>;
