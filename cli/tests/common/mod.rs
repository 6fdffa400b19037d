#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use vatcheck_cli::http::{create_app, AppState};
use vatcheck_core::api::{
    write_results, AppConfig, LookupOutcome, RegistryPlugin, Services, VerificationResult,
};

pub const BOUNDARY: &str = "vatcheck-test-boundary";

/// 按 NIP 返回预设结果的注册表桩，并记录调用
#[derive(Default)]
pub struct StubRegistry {
    replies: HashMap<String, LookupOutcome>,
    calls: Mutex<Vec<String>>,
    delay: Duration,
}

impl StubRegistry {
    pub fn with(replies: &[(&str, LookupOutcome)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// 每次查询前等待 `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryPlugin for StubRegistry {
    fn name(&self) -> &str {
        "stub"
    }

    async fn lookup(&self, nip: &str) -> LookupOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls.lock().unwrap().push(nip.to_string());
        self.replies
            .get(nip)
            .cloned()
            .unwrap_or(LookupOutcome::NotFound)
    }
}

pub fn acme() -> LookupOutcome {
    LookupOutcome::Found {
        name: Some("ACME".into()),
        status_vat: Some("Czynny".into()),
    }
}

pub fn app_with(registry: Arc<StubRegistry>, cfg: AppConfig) -> Router {
    let services = Services::new(registry, &cfg);
    create_app(AppState::new("test-instance".into(), cfg, services))
}

pub fn app(registry: Arc<StubRegistry>) -> Router {
    app_with(registry, AppConfig::default())
}

/// 一个 multipart 部件：`(字段名, 文件名, 内容)`
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub bytes: &'a [u8],
}

pub fn text_part<'a>(name: &'a str, value: &'a str) -> Part<'a> {
    Part {
        name,
        file_name: None,
        bytes: value.as_bytes(),
    }
}

pub fn file_part<'a>(name: &'a str, file_name: &'a str, bytes: &'a [u8]) -> Part<'a> {
    Part {
        name,
        file_name: Some(file_name),
        bytes,
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn form_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_text(resp: Response<Body>) -> String {
    String::from_utf8(body_bytes(resp).await).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

pub fn location(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// 生成输入工作簿：第一列从第 2 行开始是 NIP
pub fn workbook_with(nips: &[&str]) -> Vec<u8> {
    let rows: Vec<VerificationResult> = nips
        .iter()
        .map(|n| VerificationResult::new(*n, "", ""))
        .collect();
    write_results(&rows).unwrap()
}
