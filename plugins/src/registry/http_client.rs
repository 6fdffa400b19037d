use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

const BODY_PREVIEW_LIMIT: usize = 512;
const JSON_MEDIA_TYPE: &str = "application/json";
const REQUEST_ID_HEADER: &str = "RequestId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Unknown,
}

impl RegistryHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RegistryHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct RegistryHttpError {
    kind: RegistryHttpErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl RegistryHttpError {
    pub fn kind(&self) -> RegistryHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn from_reqwest(err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            RegistryHttpErrorKind::Timeout
        } else if err.is_connect() {
            RegistryHttpErrorKind::Connect
        } else if err.is_request() {
            RegistryHttpErrorKind::Request
        } else if err.is_body() {
            RegistryHttpErrorKind::Body
        } else if err.is_decode() {
            RegistryHttpErrorKind::Decode
        } else {
            RegistryHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        // reqwest hides the root cause (e.g. "operation timed out") in the source chain
        let message = match err.source() {
            Some(cause) => format!("{err}: {cause}"),
            None => err.to_string(),
        };
        RegistryHttpError {
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    fn status_error(status: u16, url: String, preview: String) -> Self {
        RegistryHttpError {
            kind: RegistryHttpErrorKind::Status,
            status: Some(status),
            url: Some(url),
            message: preview,
            source: None,
        }
    }

    fn decode_error(status: u16, url: String, err: serde_json::Error, preview: String) -> Self {
        let message = format!("failed to decode response body: {} | body={}", err, preview);
        RegistryHttpError {
            kind: RegistryHttpErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }
}

impl fmt::Display for RegistryHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registry http error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for RegistryHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

/// Registry subject; only the fields this tool consumes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "statusVat")]
    pub status_vat: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    subject: Option<Subject>,
}

#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    // Pre-built URL prefix (avoid repeated format! and trim)
    url_search_nip: String,
}

impl HttpClient {
    pub fn new(base_url: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            http,
            url_search_nip: format!("{}/api/search/nip", normalized),
        })
    }

    /// `GET /api/search/nip/{nip}?date={date}`.
    ///
    /// Returns `Ok(None)` when the registry answered 200 without a subject.
    /// Any status other than 200 is a `Status` error.
    pub async fn search_nip(
        &self,
        nip: &str,
        date: &str,
    ) -> Result<Option<Subject>, RegistryHttpError> {
        let url = format!("{}/{}", self.url_search_nip, nip);
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            target: "vatcheck.registry",
            stage = "registry.http.search.in",
            url = %url,
            date = %date,
            request_id = %request_id
        );

        let resp = self
            .http
            .get(&url)
            .query(&[("date", date)])
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|err| RegistryHttpError::from_reqwest(err, url.clone()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let preview = resp
                .text()
                .await
                .map(|body| preview_body(&body))
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RegistryHttpError::status_error(
                status.as_u16(),
                url,
                preview,
            ));
        }

        let body = resp
            .text()
            .await
            .map_err(|err| RegistryHttpError::from_reqwest(err, url.clone()))?;
        let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|err| {
            let preview = preview_body(&body);
            RegistryHttpError::decode_error(status.as_u16(), url.clone(), err, preview)
        })?;

        let subject = parsed.result.and_then(|r| r.subject);
        tracing::debug!(
            target: "vatcheck.registry",
            stage = "registry.http.search.out",
            status = %status,
            found = subject.is_some()
        );
        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use mockito::Server;
    use pretty_assertions::assert_eq;

    const UUID_PATTERN: &str =
        "^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

    #[test]
    fn test_preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn test_preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_registry_http_error_display_status() {
        let err = RegistryHttpError::status_error(
            500,
            "https://example.com/api/search/nip/1234567819".to_string(),
            "boom".to_string(),
        );
        let msg = err.to_string();
        assert!(msg.contains("kind=status"));
        assert!(msg.contains("status=500"));
        assert!(msg.contains("url=https://example.com/api/search/nip/1234567819"));
        assert!(msg.contains("boom"));
    }

    #[tokio::test]
    async fn test_search_nip_sends_headers_and_date() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/search/nip/1234567819")
            .match_query(Matcher::UrlEncoded("date".into(), "2024-05-01".into()))
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_header("requestid", Matcher::Regex(UUID_PATTERN.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result":{"subject":{"name":"ACME","statusVat":"Czynny"},"requestId":"x"}}"#)
            .create_async()
            .await;

        let client = HttpClient::new(format!("{}/", server.url()), 1_000).unwrap();
        let subject = client
            .search_nip("1234567819", "2024-05-01")
            .await
            .unwrap();
        assert_eq!(
            subject,
            Some(Subject {
                name: Some("ACME".into()),
                status_vat: Some("Czynny".into()),
            })
        );
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_nip_null_subject() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/search/nip/1234567819")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"result":{"subject":null,"requestId":"x"}}"#)
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), 1_000).unwrap();
        let subject = client.search_nip("1234567819", "2024-05-01").await.unwrap();
        assert!(subject.is_none());
    }

    #[tokio::test]
    async fn test_search_nip_missing_result_is_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/search/nip/1234567819")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), 1_000).unwrap();
        assert!(client
            .search_nip("1234567819", "2024-05-01")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_search_nip_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/search/nip/1234567819")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), 1_000).unwrap();
        let err = client
            .search_nip("1234567819", "2024-05-01")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), RegistryHttpErrorKind::Status);
        assert_eq!(err.status(), Some(500));
        assert!(err
            .url()
            .unwrap_or_default()
            .contains("/api/search/nip/1234567819"));
    }

    #[tokio::test]
    async fn test_search_nip_non_200_success_is_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/search/nip/1234567819")
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), 1_000).unwrap();
        let err = client
            .search_nip("1234567819", "2024-05-01")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[tokio::test]
    async fn test_search_nip_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/search/nip/1234567819")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), 1_000).unwrap();
        let err = client
            .search_nip("1234567819", "2024-05-01")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), RegistryHttpErrorKind::Decode);
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().contains("failed to decode response body"));
    }

    #[tokio::test]
    async fn test_search_nip_timeout() {
        // Accepts the connection but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = HttpClient::new(format!("http://{addr}"), 200).unwrap();
        let err = client
            .search_nip("1234567819", "2024-05-01")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), RegistryHttpErrorKind::Timeout);
        assert!(!err.to_string().is_empty());
        drop(listener);
    }
}
