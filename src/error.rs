//! Error types shared by both pipelines.

use std::path::PathBuf;
use thiserror::Error;

/// Broad failure category reported on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    RemoteRequest,
    Filesystem,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::RemoteRequest => "remote request error",
            ErrorKind::Filesystem => "filesystem error",
        };
        write!(f, "{}", label)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    // ===================
    // Configuration
    // ===================
    #[error("Missing {name}. Set it in the environment or in a .env file in the project root.")]
    MissingCredential { name: &'static str },

    #[error("Invalid value for {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("Failed to load env file {path}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Store item not found: {name}")]
    UnknownItem { name: String },

    // ===================
    // Remote
    // ===================
    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Response from {url} is not valid JSON")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response from {url}: {reason}")]
    UnexpectedShape { url: String, reason: String },

    // ===================
    // Filesystem
    // ===================
    #[error("Failed to create directory: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize output")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write to standard output")]
    Stdout(#[source] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingCredential { .. }
            | Error::InvalidSetting { .. }
            | Error::EnvFile { .. }
            | Error::UnknownItem { .. } => ErrorKind::Configuration,
            Error::Request { .. } | Error::InvalidJson { .. } | Error::UnexpectedShape { .. } => {
                ErrorKind::RemoteRequest
            }
            Error::CreateDir { .. }
            | Error::FileWrite { .. }
            | Error::FileRead { .. }
            | Error::JsonParse { .. }
            | Error::Serialize(_)
            | Error::Stdout(_) => ErrorKind::Filesystem,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
