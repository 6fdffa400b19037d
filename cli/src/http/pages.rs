//! HTML 页面（maud）

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use vatcheck_core::api::{VerificationResult, RESULTS_HEADER};

use super::form::{FIELD_FILE, FIELD_NIP};

/// 所有页面共用的内联样式
pub const PAGE_CSS: &str = r#"
*{box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.5;color:#111;background:#fafafa;margin:0;padding:2rem 1rem;display:flex;justify-content:center}
main{max-width:760px;width:100%}
h1{font-size:1.5rem;margin:0 0 1.25rem}
form{display:flex;flex-direction:column;gap:.75rem;padding:1.25rem;background:#fff;border:1px solid #ddd;border-radius:8px}
label{font-weight:600}
input[type=text]{padding:.5rem;font-size:1rem;border:1px solid #bbb;border-radius:4px}
button{align-self:flex-start;padding:.5rem 1.25rem;font-size:1rem;border:0;border-radius:4px;background:#1f5fbf;color:#fff;cursor:pointer}
.error{padding:.75rem 1rem;margin-bottom:1rem;background:#fdecea;color:#8a1c13;border-radius:4px}
.hint{color:#666;font-size:.9rem}
table{border-collapse:collapse;width:100%;background:#fff}
th,td{border:1px solid #ddd;padding:.4rem .6rem;text-align:left}
th{background:#f0f0f0}
.actions{margin-top:1rem;display:flex;gap:1.5rem}
progress{width:100%;height:1.25rem}
"#;

fn layout(title: &str, refresh_secs: Option<u32>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pl" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(secs) = refresh_secs {
                    meta http-equiv="refresh" content=(secs);
                }
                title { (title) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body) }
            }
        }
    }
}

/// 表单页；`error` 为输入级错误提示
pub fn index_page(error: Option<&str>) -> Markup {
    layout(
        "Sprawdzanie NIP",
        None,
        html! {
            h1 { "Sprawdzanie NIP na Białej Liście VAT" }
            @if let Some(msg) = error {
                p class="error" { (msg) }
            }
            form method="post" action="/" enctype="multipart/form-data" {
                label for=(FIELD_NIP) { "NIP" }
                input type="text" id=(FIELD_NIP) name=(FIELD_NIP) placeholder="np. 123-456-78-19";
                label for=(FIELD_FILE) { "lub plik .xlsx" }
                input type="file" id=(FIELD_FILE) name=(FIELD_FILE) accept=".xlsx";
                p class="hint" { "Numery NIP w pierwszej kolumnie, od drugiego wiersza." }
                button type="submit" { "Sprawdź" }
            }
        },
    )
}

/// 结果表格页
pub fn results_page(results: &[VerificationResult], download_href: &str) -> Markup {
    layout(
        "Wyniki",
        None,
        html! {
            h1 { "Wyniki" }
            table {
                thead {
                    tr {
                        @for col in RESULTS_HEADER {
                            th { (col) }
                        }
                    }
                }
                tbody {
                    @for r in results {
                        tr {
                            td { (r.nip) }
                            td { (r.label) }
                            td { (r.status) }
                        }
                    }
                }
            }
            @if results.is_empty() {
                p class="hint" { "Plik nie zawierał numerów NIP." }
            }
            div class="actions" {
                a href=(download_href) { "Pobierz wyniki (.xlsx)" }
                a href="/" { "Sprawdź kolejne" }
            }
        },
    )
}

/// 后台任务进行中：每 2 秒自动刷新
pub fn pending_page(task_id: &str, done: usize, total: usize) -> Markup {
    layout(
        "Trwa sprawdzanie",
        Some(2),
        html! {
            h1 { "Trwa sprawdzanie…" }
            progress max=(total.max(1)) value=(done) {}
            p { "Sprawdzono " (done) " z " (total) "." }
            p class="hint" { "Zadanie " code { (task_id) } }
        },
    )
}

pub fn failed_page(message: &str) -> Markup {
    layout(
        "Błąd",
        None,
        html! {
            h1 { "Sprawdzanie nie powiodło się" }
            p class="error" { (message) }
            a href="/" { "Wróć do formularza" }
        },
    )
}

/// 页面路由的错误：渲染为 HTML
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("invalid form: {0}")]
    Form(#[from] MultipartError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "Nie znaleziono", msg.clone()),
            Self::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Serwis zajęty",
                msg.clone(),
            ),
            Self::Internal(msg) => {
                tracing::error!(target: "vatcheck.http", error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Błąd serwera",
                    "Wystąpił błąd wewnętrzny. Spróbuj ponownie później.".to_string(),
                )
            }
            Self::Form(err) => (err.status(), "Nieprawidłowy formularz", err.body_text()),
        };

        let markup = layout(
            title,
            None,
            html! {
                h1 { (title) }
                p class="error" { (message) }
                a href="/" { "Wróć do formularza" }
            },
        );

        (status, markup).into_response()
    }
}
