//! Stateless HTTP request builder and response parser for the todo API.
//!
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Every mutating endpoint answers with the whole
//! collection, so the parse methods for create and mark-done return
//! `Vec<TodoItem>` rather than a single item.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, TodoItem};

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_healthcheck(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, "/healthcheck".to_string())
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, "/api/todos".to_string())
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/todos", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Accepts any `Display` id, so non-numeric ids can be sent as-is.
    pub fn build_mark_done(&self, id: impl std::fmt::Display) -> HttpRequest {
        self.bodyless(HttpMethod::Patch, format!("/api/todos/{id}/done"))
    }

    pub fn parse_healthcheck(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        if response.body != "OK" {
            return Err(ApiError::UnexpectedBody(response.body));
        }
        Ok(())
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        parse_collection(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        parse_collection(response)
    }

    pub fn parse_mark_done(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        parse_collection(response)
    }

    fn bodyless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }
}

fn parse_collection(response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Every endpoint answers 200 on success.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        401 => Err(ApiError::InvalidId),
        500 => Err(ApiError::SaveFailed),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
