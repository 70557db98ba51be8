//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `brave-build`. It uses the `thiserror` library to create a single `Error`
//! enum that covers all anticipated failure modes, providing clear and
//! descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur while resolving a build configuration or invoking external tools.
//!   Each variant corresponds to a specific type of error and includes
//!   contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! All configuration errors are fatal to the current command: the resolver
//! operates on already-materialized local state, so nothing is retried. A
//! fatal error aborts the command before any external tool is invoked, with a
//! message naming the offending key or project.

use thiserror::Error;

/// Main error type for brave-build operations
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value could not be parsed into its expected type.
    ///
    /// Includes the environment key that held the malformed value.
    #[error("Configuration parsing error for {key}: {message}")]
    ConfigParse { key: String, message: String },

    /// The resolved configuration is inconsistent or incomplete, for example
    /// a reference to a project that is not declared in the manifest.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An error occurred with a path-list operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An external tool could not be spawned or exited with a failure.
    #[error("Command failed: {command} - {message}")]
    Command { command: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
