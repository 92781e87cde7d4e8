//! In-process HTTP requests against the router

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use go_mocker::mocker::Mocker;
use go_mocker::server::router;
use go_mocker::service::MockService;

/// Response status, content type and body text
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub fn test_service() -> Arc<MockService> {
    Arc::new(MockService::new(Mocker::default(), "."))
}

/// Send `request` through a fresh router
pub async fn send(service: Arc<MockService>, request: Request<Body>) -> TestResponse {
    let response = router(service).oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// `POST /mock` with `source` as the body
pub async fn post_mock(service: Arc<MockService>, source: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri("/mock")
        .body(Body::from(source.to_string()))
        .unwrap();
    send(service, request).await
}
