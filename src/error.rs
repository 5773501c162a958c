//! Input-format errors.
//!
//! These are raised when text handed to an operation cannot be parsed at all.
//! Expected validation outcomes (JSONPath syntax, schema shape, environment
//! variable names) have their own error types next to the code that checks
//! them.

use thiserror::Error;

/// Error is returned when input text cannot be parsed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid CSV at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("invalid properties at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("invalid Java source: {message}")]
    Java { message: String },

    #[error("cannot fill SQL: {message}")]
    Sql { message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a CSV error.
    pub fn csv(line: usize, message: impl Into<String>) -> Self {
        Error::Csv {
            line,
            message: message.into(),
        }
    }

    /// Creates a properties error.
    pub fn properties(line: usize, message: impl Into<String>) -> Self {
        Error::Properties {
            line,
            message: message.into(),
        }
    }

    /// Creates a Java source error.
    pub fn java(message: impl Into<String>) -> Self {
        Error::Java {
            message: message.into(),
        }
    }

    /// Creates an SQL fill error.
    pub fn sql(message: impl Into<String>) -> Self {
        Error::Sql {
            message: message.into(),
        }
    }

    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for operations that parse input text.
pub type Result<T> = std::result::Result<T, Error>;
