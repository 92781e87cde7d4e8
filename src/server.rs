//! HTTP surface: `POST /mock` with Go source in the body
//!
//! The source must declare exactly one interface. The response is the stub as
//! `text/plain`, or `{"error": ..., "kind": ...}` on failure.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{ErrorKind, MockError};
use crate::service::MockService;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound | ErrorKind::AmbiguousInput | ErrorKind::Usage => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::Render | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(e: MockError) -> Response {
    let kind = e.kind();
    let status = status_for(kind);
    if status.is_server_error() {
        error!("Mock request failed: {}", e);
    } else {
        warn!("Rejected mock request: {}", e);
    }

    let body = ErrorBody {
        error: e.to_string(),
        kind: kind.as_str(),
    };
    (status, Json(body)).into_response()
}

pub fn router(service: Arc<MockService>) -> Router {
    Router::new()
        .route("/mock", post(mock_handler))
        .with_state(service)
}

async fn mock_handler(State(service): State<Arc<MockService>>, body: Bytes) -> Response {
    let source = match String::from_utf8(body.to_vec()) {
        Ok(source) => source,
        Err(e) => return error_response(MockError::InvalidEncoding(e)),
    };
    let result = tokio::task::spawn_blocking(move || service.process_one(&source)).await;

    match result {
        Ok(Ok(stub)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            stub,
        )
            .into_response(),
        Ok(Err(e)) => error_response(e),
        Err(e) => error_response(MockError::io("request body", std::io::Error::other(e))),
    }
}

/// Serve the router on `address` until ctrl-c
pub async fn run_server(address: &str, service: Arc<MockService>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("go-mocker listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutting down");
        })
        .await
}
