//! Error types for the todo store and the API client.
//!
//! # Design
//! `StoreError` separates the two startup failures (`Read`, `Format`) from
//! the write-through failure (`Write`) so the server can refuse to start on
//! the former and answer 500 on the latter. A failed write-through does not
//! undo the in-memory mutation; callers only learn that the file is stale.
//!
//! `ApiError` mirrors the server's documented failure statuses so client
//! callers can match on them instead of raw status codes.

use std::io;
use std::path::PathBuf;

/// Errors raised by `TodoStore`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The data file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data file was read but is not a JSON array of todo items.
    #[error("failed to parse {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be written back to the data file.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The collection could not be encoded as JSON.
    #[error("failed to encode todos: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the path id (401 `Invalid ID`).
    #[error("invalid todo id")]
    InvalidId,

    /// The server mutated its state but failed to persist it (500).
    #[error("server failed to save todos")]
    SaveFailed,

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The body had the right status but unexpected content.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
