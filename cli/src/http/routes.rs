//! HTTP路由handlers

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use maud::Markup;
use tokio::task::JoinError;
use vatcheck_core::api::{
    collect_identifiers, write_results, ResultSet, TaskError, TaskState, RESULTS_FILE_NAME,
    XLSX_MIME,
};

use crate::http::{
    form::read_submitted_form,
    models::*,
    pages::{failed_page, index_page, pending_page, results_page, PageError},
    state::{AppState, StatsSnapshot},
    validation::{validate_path_id, validate_verify_request},
};

pub const NO_FILE_MESSAGE: &str = "Brak pliku do pobrania";

/// 创建所有路由
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/status/:task_id", get(status_page_handler))
        .route("/wyniki/:token", get(results_page_handler))
        .route("/pobierz", get(download_latest_handler))
        .route("/pobierz/:token", get(download_token_handler))
        .route("/api/v1/verify", post(api_verify_handler))
        .route("/api/v1/status/:task_id", get(api_status_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// GET / - 表单页
async fn index_handler(State(state): State<AppState>) -> Markup {
    state.record_request("/");
    index_page(None)
}

/// POST / - 提交表单（同步模式直接渲染结果，后台模式重定向到状态页）
async fn submit_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    state.record_request("/");

    let form = read_submitted_form(multipart).await.map_err(|e| {
        state.record_error();
        PageError::Form(e)
    })?;

    let identifiers = match collect_identifiers(
        form.nip.as_deref(),
        form.upload(),
        state.config.batch.max_identifiers,
    ) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::info!(target: "vatcheck.http", error = %e, "form rejected");
            return Ok(index_page(Some(&e.to_string())).into_response());
        }
    };

    if state.config.batch.background {
        let task_id = state.services.tasks.submit(identifiers).map_err(|e| {
            state.record_error();
            PageError::Unavailable(e.to_string())
        })?;
        return Ok(Redirect::to(&format!("/status/{task_id}")).into_response());
    }

    let (results, token) = run_batch_detached(&state, identifiers)
        .await
        .map_err(|e| {
            state.record_error();
            PageError::Internal(e.to_string())
        })?;
    Ok(results_page(&results, &format!("/pobierz/{token}")).into_response())
}

/// 在独立任务中执行同步批处理并保存结果
///
/// 请求 future 被超时层丢弃时，批处理仍会跑完并写入 ResultStore。
async fn run_batch_detached(
    state: &AppState,
    identifiers: Vec<String>,
) -> Result<(ResultSet, String), JoinError> {
    let services = state.services.clone();
    tokio::spawn(async move {
        let results = services.verifier.verify_all(&identifiers).await;
        let token = services.results.put(results.clone()).await;
        (results, token)
    })
    .await
}

/// GET /status/:task_id - 后台任务状态页
async fn status_page_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response, PageError> {
    state.record_request("/status");

    if !validate_path_id(&task_id) {
        return Err(PageError::NotFound(task_id));
    }

    match state.services.tasks.poll(&task_id) {
        Ok(TaskState::Pending { done, total }) => {
            Ok(pending_page(&task_id, done, total).into_response())
        }
        Ok(TaskState::Done { token }) => {
            Ok(Redirect::to(&format!("/wyniki/{token}")).into_response())
        }
        Ok(TaskState::Failed { message }) => Ok(failed_page(&message).into_response()),
        Err(e) => Err(PageError::NotFound(e.to_string())),
    }
}

/// GET /wyniki/:token - 已保存结果的表格页
async fn results_page_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Markup, PageError> {
    state.record_request("/wyniki");

    if !validate_path_id(&token) {
        return Err(PageError::NotFound(token));
    }

    let stored = state
        .services
        .results
        .get(&token)
        .await
        .ok_or_else(|| PageError::NotFound(format!("wyniki {token}")))?;

    Ok(results_page(stored.results(), &format!("/pobierz/{token}")))
}

/// GET /pobierz - 下载最近一次运行的结果
async fn download_latest_handler(State(state): State<AppState>) -> Response {
    state.record_request("/pobierz");

    match state.services.results.latest_workbook().await {
        Ok(Some(bytes)) => xlsx_attachment(bytes),
        Ok(None) => (StatusCode::NOT_FOUND, NO_FILE_MESSAGE).into_response(),
        Err(e) => {
            state.record_error();
            PageError::Internal(e.to_string()).into_response()
        }
    }
}

/// GET /pobierz/:token - 下载指定结果集
async fn download_token_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Response {
    state.record_request("/pobierz");

    let stored = if validate_path_id(&token) {
        state.services.results.get(&token).await
    } else {
        None
    };
    let Some(stored) = stored else {
        return (StatusCode::NOT_FOUND, NO_FILE_MESSAGE).into_response();
    };

    match write_results(stored.results()) {
        Ok(bytes) => xlsx_attachment(bytes),
        Err(e) => {
            state.record_error();
            PageError::Internal(e.to_string()).into_response()
        }
    }
}

fn xlsx_attachment(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{RESULTS_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// POST /api/v1/verify - 同步校验一批 NIP
async fn api_verify_handler(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, HttpServerError> {
    state.record_request("/api/v1/verify");

    validate_verify_request(&req, state.config.batch.max_identifiers)?;

    let (results, token) = run_batch_detached(&state, req.nips)
        .await
        .map_err(|e| {
            state.record_error();
            HttpServerError::Internal(e.to_string())
        })?;

    Ok(Json(VerifyResponse {
        success: true,
        data: Some(results),
        token: Some(token),
        error: None,
        error_code: None,
    }))
}

/// GET /api/v1/status/:task_id - 任务状态（JSON）
async fn api_status_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskStatusResponse>, HttpServerError> {
    state.record_request("/api/v1/status");

    match state.services.tasks.poll(&task_id) {
        Ok(task_state) => Ok(Json(TaskStatusResponse {
            success: true,
            task_id,
            state: task_state,
        })),
        Err(e @ TaskError::NotFound(_)) => Err(HttpServerError::NotFound(e.to_string())),
        Err(e) => {
            state.record_error();
            Err(HttpServerError::Internal(e.to_string()))
        }
    }
}

/// GET /health - 健康检查
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    state.record_request("/health");

    let StatsSnapshot {
        uptime_seconds,
        requests_handled,
        errors_total,
        requests_by_endpoint,
    } = state.stats_snapshot();
    Json(HealthResponse {
        status: "healthy".to_string(),
        instance_id: state.instance_id.clone(),
        uptime_seconds,
        requests_handled,
        errors_total,
        requests_by_endpoint,
        active_tasks: state.services.tasks.active_count(),
        stored_results: state.services.results.len().await,
        background: state.config.batch.background,
        timestamp: Local::now().to_rfc3339(),
    })
}
