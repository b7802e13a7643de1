//! Domain types for the todo API.
//!
//! # Design
//! `TodoItem` is both the wire shape returned by the server and the record
//! stored in the data file, so the field order here is the field order on
//! disk. Decoding is lenient: missing fields fall back to their zero value and
//! unknown fields are ignored, which keeps hand-edited data files loadable.
//! An explicit `null` decodes to the zero value as well.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single todo item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TodoItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub done: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
}

/// Request payload for creating a new todo.
///
/// Both fields are optional on the wire and default to the empty string. The
/// store assigns `id` and `done`, so clients cannot set them here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}
