use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use todo_core::StoreError;

/// Failures a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The `:id` path segment is not an integer.
    #[error("invalid id {0:?}")]
    InvalidId(String),

    /// The request body was not a valid `CreateTodo`.
    #[error(transparent)]
    Decode(#[from] JsonRejection),

    /// The mutation happened in memory but could not be written to disk.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidId(raw) => {
                tracing::debug!(id = %raw, "rejecting non-integer id");
                (StatusCode::UNAUTHORIZED, "Invalid ID").into_response()
            }
            AppError::Decode(rejection) => {
                tracing::debug!(error = %rejection, "rejecting request body");
                rejection.into_response()
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "failed to save todos");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error saving todos").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_maps_to_401() {
        let resp = AppError::InvalidId("abc".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn store_error_maps_to_500() {
        let err = StoreError::Write {
            path: "todos.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
