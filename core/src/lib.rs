//! Core of the file-backed todo service.
//!
//! # Overview
//! - `store`: the authoritative in-memory todo collection, mirrored to a
//!   pretty-printed JSON file after every mutation.
//! - `client`: a stateless host-does-IO client that builds `HttpRequest`
//!   values and parses `HttpResponse` values for the service's HTTP API.
//!
//! The server crate wires `TodoStore` into axum handlers; nothing in here
//! binds a socket.

pub mod client;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{TodoStore, WriteMode};
pub use types::{CreateTodo, TodoItem};
