use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, Method},
    routing::{get, patch},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use todo_core::{CreateTodo, TodoItem, TodoStore};

pub mod config;
pub mod error;

pub use config::ServerConfig;
pub use error::AppError;

pub type SharedStore = Arc<TodoStore>;

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}/done", patch(mark_done))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Any origin, with the browser headers a JSON client sends.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::HEAD,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutting down");
}

async fn healthcheck() -> &'static str {
    "OK"
}

async fn list_todos(State(store): State<SharedStore>) -> Json<Vec<TodoItem>> {
    Json(store.list().await)
}

async fn create_todo(
    State(store): State<SharedStore>,
    input: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Json<Vec<TodoItem>>, AppError> {
    let Json(input) = input?;
    let todos = store.create(input).await?;
    Ok(Json(todos))
}

async fn mark_done(
    State(store): State<SharedStore>,
    Path(raw): Path<String>,
) -> Result<Json<Vec<TodoItem>>, AppError> {
    let id: i64 = raw.parse().map_err(|_| AppError::InvalidId(raw.clone()))?;
    let todos = store.mark_done(id).await?;
    Ok(Json(todos))
}
