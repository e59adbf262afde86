// src/error.rs

//! Error types for recipe parsing, target resolution and build execution

use thiserror::Error;

/// Errors raised while planning or running an OpenSSL build
#[derive(Error, Debug)]
pub enum Error {
    /// No Configure target exists for this os/arch combination
    #[error("Unsupported platform: os '{os}', arch '{arch}' has no OpenSSL Configure target")]
    UnsupportedPlatform { os: String, arch: String },

    /// The OS is known but the architecture has no mapping for it
    #[error("Architecture '{arch}' not known for {os}")]
    UnknownArchitecture { os: String, arch: String },

    /// The OS is known but the SDK has no mapping for it
    #[error("SDK '{sdk}' not known for {os}")]
    UnknownSdk { os: String, sdk: String },

    /// An external build process exited unsuccessfully
    #[error("{phase} failed ({}): {command}\nstdout: {stdout}\nstderr: {stderr}", exit_description(.code))]
    CommandFailed {
        phase: String,
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// A build tool could not be located
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Malformed recipe or platform value
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A required file or directory is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;
