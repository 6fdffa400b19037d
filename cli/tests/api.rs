mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;
use vatcheck_core::api::LookupOutcome;

#[tokio::test]
async fn verify_returns_one_row_per_input() {
    let registry = Arc::new(StubRegistry::with(&[
        ("1234567819", acme()),
        (
            "2222222222",
            LookupOutcome::Transport("operation timed out".into()),
        ),
    ]));

    let resp = app(registry.clone())
        .oneshot(post_json(
            "/api/v1/verify",
            json!({"nips": ["123-456-78-19", "abc", "2222222222", "3333333333"]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["token"].is_string());
    assert_eq!(
        body["data"],
        json!([
            {"nip": "1234567819", "label": "ACME", "status": "Czynny"},
            {"nip": "", "label": "Nieprawidłowy NIP", "status": "Błąd"},
            {"nip": "2222222222", "label": "Błąd zapytania", "status": "operation timed out"},
            {"nip": "3333333333", "label": "Nie znaleziono w rejestrze", "status": "Brak"},
        ])
    );
    assert_eq!(registry.calls().len(), 3);
}

#[tokio::test]
async fn verify_rejects_empty_request() {
    let resp = app(Arc::new(StubRegistry::default()))
        .oneshot(post_json("/api/v1/verify", json!({"nips": []})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn status_of_unknown_task_is_404() {
    let resp = app(Arc::new(StubRegistry::default()))
        .oneshot(get("/api/v1/status/missing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn health_counts_requests() {
    let app = app(Arc::new(StubRegistry::default()));
    app.clone().oneshot(get("/")).await.unwrap();
    app.clone().oneshot(get("/pobierz")).await.unwrap();

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["instance_id"], "test-instance");
    assert_eq!(body["requests_handled"], 3);
    assert_eq!(body["errors_total"], 0);
    assert_eq!(body["requests_by_endpoint"]["/"], 1);
    assert_eq!(body["requests_by_endpoint"]["/pobierz"], 1);
    assert_eq!(body["requests_by_endpoint"]["/health"], 1);
    assert_eq!(body["active_tasks"], 0);
    assert_eq!(body["background"], false);
}

#[tokio::test]
async fn health_counts_errors() {
    let app = app(Arc::new(StubRegistry::default()));
    // 非法 multipart：缺少结束分隔符
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/")
        .header(
            axum::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(axum::body::Body::from(format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"nip\"\r\n\r\n123"
        )))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());

    let body = body_json(app.oneshot(get("/health")).await.unwrap()).await;
    assert_eq!(body["errors_total"], 1);
}
