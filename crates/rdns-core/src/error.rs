//! Error types for the reverse DNS reconciliation system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for reverse DNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the reverse DNS reconciliation system
#[derive(Error, Debug)]
pub enum Error {
    /// A list call against a remote collection reported failure
    #[error("remote list failed for {collection}: {message}")]
    RemoteList {
        /// Collection that was listed (e.g. "zones", "records")
        collection: String,
        /// Error message
        message: String,
    },

    /// A create call reported failure or returned no usable payload
    #[error("remote create failed for {collection}: {message}")]
    RemoteCreate {
        /// Collection that was created against (e.g. "zones", "records")
        collection: String,
        /// Error message
        message: String,
    },

    /// An update or destroy call reported failure
    #[error("remote {operation} failed: {message}")]
    RemoteMutation {
        /// Operation that failed ("update" or "destroy")
        operation: String,
        /// Error message
        message: String,
    },

    /// Underlying connectivity/protocol failure from the transport
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Provider-specific error (the only kind a caller of a provider sees)
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a remote-list error
    pub fn remote_list(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteList {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create a remote-create error
    pub fn remote_create(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteCreate {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create a remote-mutation error
    pub fn remote_mutation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteMutation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
