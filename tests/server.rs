//! HTTP surface tests

mod helper;

use axum::body::Body;
use axum::http::{Request, StatusCode};

use helper::{READER_SOURCE, WRITER_SOURCE, post_mock, send, test_service};

#[tokio::test]
async fn returns_stub_for_single_interface() {
    let response = post_mock(test_service(), READER_SOURCE).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.content_type.as_deref(),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(
        response.body,
        "// Code generated by go-mocker. DO NOT EDIT.\n\
         \n\
         package mock\n\
         \n\
         type ReaderMock struct{}\n\
         \n\
         func (r *ReaderMock) Read(p []byte) (int, error) {\n\
         \treturn 1, nil\n\
         }\n"
    );
}

#[tokio::test]
async fn rejects_more_than_one_interface() {
    let source = format!("{}\n{}", READER_SOURCE, WRITER_SOURCE.replace("package io\n", ""));
    let response = post_mock(test_service(), &source).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["kind"], "ambiguous_input");
    assert_eq!(
        body["error"],
        "more than one interface found (Reader, Writer), only one at a time is supported"
    );
}

#[tokio::test]
async fn rejects_source_without_interface() {
    let response = post_mock(test_service(), "package io\n\ntype Item struct{}\n").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["kind"], "not_found");
}

#[tokio::test]
async fn rejects_unparsable_method() {
    let source = "package io\n\ntype ReadCloser interface {\n\tio.Reader\n}\n";
    let response = post_mock(test_service(), source).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["kind"], "not_found");
    assert!(body["error"].as_str().unwrap().contains("ReadCloser"));
}

#[tokio::test]
async fn rejects_body_that_is_not_utf8_with_error_payload() {
    let request = Request::builder()
        .method("POST")
        .uri("/mock")
        .body(Body::from(vec![b't', b'y', 0xff, 0xfe]))
        .unwrap();
    let response = send(test_service(), request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    let body = response.json();
    assert_eq!(body["kind"], "usage");
    assert!(body["error"].as_str().unwrap().contains("not valid UTF-8"));
}

#[tokio::test]
async fn only_accepts_post() {
    let request = Request::builder()
        .method("GET")
        .uri("/mock")
        .body(Body::empty())
        .unwrap();
    let response = send(test_service(), request).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
